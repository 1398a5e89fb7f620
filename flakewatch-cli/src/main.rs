//! FlakeWatch CLI - command-line interface
//!
//! This binary provides a command-line interface to the FlakeWatch
//! library: sync flaky-test issues from a GitHub repository and emit a
//! recurrence report as text, JSON, or HTML.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flakewatch")]
#[command(about = "Track flaky-test issues and how often they recur", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync flaky-test issues and emit a recurrence report
    Sync(commands::sync::SyncArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sync(args) => {
            if let Err(error) = commands::sync::run(args).await {
                error.exit();
            }
        }
    }
}
