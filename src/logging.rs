use crate::config::ExportConfig;
use crate::errors::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `config.log_level` is used.
/// Output goes to stderr so it never mixes with anything piped from stdout.
pub fn init_logging(config: &ExportConfig) -> AppResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| AppError::InvalidInput(format!("Invalid log level: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::IoError(format!("Failed to initialize logging: {e}")))?;

    Ok(())
}
