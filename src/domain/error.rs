//! Error types for the zacman plugin.
//!
//! This module defines the centralized error type [`ZacmanError`] and a type alias
//! [`Result`] used throughout the crate. All variants are implemented with the
//! `thiserror` crate.
//!
//! Most failures of external package-manager calls are *not* errors in this sense:
//! they travel through the event loop as failed completions and are turned into
//! status lines or overlays. `ZacmanError` covers the places where the crate itself
//! cannot continue a computation (unreadable theme file, malformed command context).

use thiserror::Error;

/// The main error type for zacman operations.
///
/// # Examples
///
/// ```
/// use zacman::ZacmanError;
///
/// fn validate() -> Result<(), ZacmanError> {
///     Err(ZacmanError::Config("min_query_len must be positive".to_string()))
/// }
///
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ZacmanError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, such as reading a
    /// custom theme file or opening the log file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme lookup or parsing failed.
    ///
    /// The string describes which theme could not be loaded and why.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A command result could not be matched to a request.
    ///
    /// Occurs when a `RunCommandResult` or pane exit arrives without the context
    /// keys that identify which request produced it.
    #[error("Command error: {0}")]
    Command(String),

    /// Package manager output could not be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON encoding or decoding of a command context payload failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized `Result` type for zacman operations.
pub type Result<T> = std::result::Result<T, ZacmanError>;
