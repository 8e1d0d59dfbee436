//! UAT Wizard - guided user acceptance testing for workstation changes
//!
//! Walks a tester through website checks, network diagnostics and
//! application tests, then exports a CSV report.

use clap::Parser;
use uat::common::logging;
use uat::{cli, commands};
use commands::Commands;

#[derive(Parser)]
#[command(name = "uat", about = "Guided user acceptance testing wizard")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The interactive wizard owns the terminal, so it logs to a file
    let (log_path, _guard) = match cli.command {
        Commands::Run { .. } => match logging::init_interactive() {
            Some((path, guard)) => (Some(path), Some(guard)),
            None => (None, None),
        },
        _ => {
            logging::init_cli();
            (None, None)
        }
    };

    if let Err(e) = cli::dispatch(cli.command, log_path).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
