//! Structured logging to a rotating file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → zacman.log (+ rotated backups)
//! ```
//!
//! - **Location**: `~/.local/share/zellij/zacman/zacman.log`
//! - **Rotation**: at 10 MB, keeping 3 timestamped backups
//!
//! # Configuration
//!
//! The level comes from the `trace_level` plugin option and accepts any
//! `EnvFilter` directive (`debug`, `zacman=trace`, ...). Default: `"info"`.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`file_writer`]: rotating file writer

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
