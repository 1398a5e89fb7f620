//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and appropriate exit codes.

use std::fmt;
use std::process;

use flakewatch::sync::SyncError;
use flakewatch::tracker::TrackerError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid command-line configuration
    Config(String),
    /// Failed to create the tracker client
    ClientCreation(TrackerError),
    /// Synchronization failed
    Sync(SyncError),
    /// Failed to write the report file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        if let CliError::Sync(SyncError::Fetch(TrackerError::Status { status: 403, .. })) = self {
            eprintln!();
            eprintln!("GitHub answered 403. If you are hitting the API rate limit:");
            eprintln!("  1. Export GITHUB_API_KEY with a personal access token");
            eprintln!("  2. Lower the request rate with --rate");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ClientCreation(e) => write!(f, "Failed to create tracker client: {}", e),
            CliError::Sync(e) => write!(f, "Sync failed: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ClientCreation(e) => Some(e),
            CliError::Sync(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<SyncError> for CliError {
    fn from(e: SyncError) -> Self {
        CliError::Sync(e)
    }
}
