//! Tracing setup. Logs go to a file so they never interfere with the
//! terminal UI.

use std::fs::File;
use std::io;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Filter from `RUST_LOG`, falling back to the configured directives.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Install the global subscriber writing to the configured log file.
///
/// Calling this again after a subscriber is installed is harmless.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    let log_file = File::create(&config.file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Ok(())
}
