//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the plugin data directory.
pub const LOG_FILE_NAME: &str = "zacman.log";

/// Installs the global tracing subscriber writing to a rotating log file.
///
/// The pipeline is an [`EnvFilter`] built from `config.trace_level`
/// (default `info`) followed by a plain-text fmt layer over [`FileWriter`].
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Returns silently if that fails; logging is optional
/// - Idempotent: only the first successful call installs a subscriber
///
/// # Example
///
/// ```rust,no_run
/// use zacman::observability::init_tracing;
/// use zacman::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let writer = FileWriter::new(data_dir.join(LOG_FILE_NAME));
    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt_layer)
        .try_init();
}
