//! CLI command definitions
//!
//! Defines the clap commands for the UAT wizard CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run an interactive UAT session
    Run {
        /// Seed for reproducible simulated results
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to save the report in (default: data dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the report instead of saving it
        #[arg(long, conflicts_with = "output_dir")]
        stdout: bool,

        /// Username for this session (skips the prompt)
        #[arg(long, short)]
        username: Option<String>,
    },

    /// Execute a scripted UAT session defined in a YAML file
    Scenario {
        /// Path to the YAML scenario file
        path: PathBuf,

        /// Directory to save reports in (default: data dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,
    },

    /// Show or change the remembered username
    User {
        /// Remember this username
        #[arg(long, conflicts_with = "clear")]
        set: Option<String>,

        /// Forget the remembered username
        #[arg(long)]
        clear: bool,
    },

    /// List the configured website checks and application tests
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
