use anyhow::Context;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "FITLOG_LOG";

/// Builds a subscriber that appends plain-text events to `path`.
///
/// The terminal belongs to the UI, so events only ever go to a file.
pub fn file_subscriber(path: &Path, level: &str) -> anyhow::Result<impl Subscriber + Send + Sync + use<>> {
    let file = open_log_file(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .finish())
}

/// Installs the file subscriber globally when a log file is configured.
pub fn init_logging(path: Option<&Path>, level: &str) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let subscriber = file_subscriber(path, level)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;
    Ok(())
}

fn open_log_file(path: &Path) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
