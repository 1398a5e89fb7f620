//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization and file operations to keep
//! command handlers small.

use flakewatch::logging::{default_log_dir, default_log_file, init_logging, LoggingGuard};
use tracing::info;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while the runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
}

impl CliRunner {
    /// Create a new CLI runner and initialize logging.
    ///
    /// Logs go to the log file and stderr; stdout stays reserved for
    /// report output.
    pub fn new() -> Result<Self, CliError> {
        let logging_guard = init_logging(default_log_dir(), default_log_file())
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self { logging_guard })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("FlakeWatch v{}", flakewatch::VERSION);
        info!("FlakeWatch CLI: {} command", command);
    }

    /// Write a rendered report to a file.
    pub fn save_report(&self, path: &str, contents: &str) -> Result<(), CliError> {
        write_report(path, contents)?;

        info!(path, bytes = contents.len(), "report written");
        println!("✓ Report written: {} ({} bytes)", path, contents.len());

        Ok(())
    }
}

/// Write report contents to disk, mapping failures to
/// [`CliError::FileWrite`].
fn write_report(path: &str, contents: &str) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|e| CliError::FileWrite {
        path: path.to_string(),
        error: e,
    })
}
