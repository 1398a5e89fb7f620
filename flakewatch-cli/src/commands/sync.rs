//! Sync command - synchronize flaky-test issues and emit a report.

use std::sync::Arc;

use clap::{Args, ValueEnum};
use tracing::warn;

use flakewatch::config::{SyncSettings, DEFAULT_REQUESTS_PER_SECOND, DEFAULT_WORKER_COUNT};
use flakewatch::report;
use flakewatch::sync::SyncController;
use flakewatch::tracker::{
    GitHubClient, GitHubConfig, DEFAULT_FLAKE_LABEL, DEFAULT_OWNER, DEFAULT_REPO,
};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Environment variable holding the GitHub API token.
const API_KEY_VAR: &str = "GITHUB_API_KEY";

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// One `[number|count]: title` line per issue, least-referenced first
    #[default]
    Text,
    /// JSON object with an `items` list, in collection order
    Json,
    /// Self-contained Bootstrap dashboard page
    Html,
}

/// Arguments for the sync command.
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Repository owner to sync from
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Repository name to sync from
    #[arg(long, default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Label selecting flaky-test issues
    #[arg(long, default_value = DEFAULT_FLAKE_LABEL)]
    pub label: String,

    /// Number of enrichment workers
    #[arg(long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,

    /// Tracker requests per second across all workers
    #[arg(long, default_value_t = DEFAULT_REQUESTS_PER_SECOND)]
    pub rate: u32,
}

/// Run the sync command.
pub async fn run(args: SyncArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("sync");

    if args.workers == 0 {
        return Err(CliError::Config("workers must be > 0".to_string()));
    }
    if args.rate == 0 {
        return Err(CliError::Config("rate must be > 0".to_string()));
    }

    let mut config = GitHubConfig::new()
        .with_repository(&args.owner, &args.repo)
        .with_label(&args.label);

    // Credentials stay a CLI concern; the library takes an explicit token
    match std::env::var(API_KEY_VAR) {
        Ok(token) if !token.is_empty() => config = config.with_token(token),
        _ => warn!("{} not set, using unauthenticated API limits", API_KEY_VAR),
    }

    let settings = SyncSettings::new()
        .with_worker_count(args.workers)
        .with_requests_per_second(args.rate);

    let client = GitHubClient::new(config).map_err(CliError::ClientCreation)?;
    let mut controller = SyncController::new(Arc::new(client), settings);

    controller.run().await?;

    let rendered = match args.output {
        OutputFormat::Text => report::text::render(&controller.sorted_results()),
        OutputFormat::Json => controller.json_results()?,
        OutputFormat::Html => {
            report::html::render(&args.owner, &args.repo, &controller.sorted_results())
        }
    };

    match &args.file {
        Some(path) => runner.save_report(path, &rendered)?,
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}
