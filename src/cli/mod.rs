//! CLI command handling
//!
//! Dispatches CLI commands and formats their output.

mod input;
mod interactive;
mod render;

pub use input::{parse_input, Input};
pub use interactive::RunOptions;

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::commands::Commands;
use crate::common::config::{AppTestDefinition, Config, WebsiteDefinition};
use crate::common::{Error, Result};
use crate::profile::ProfileStore;
use crate::scenario::{self, ScenarioOptions};

/// Dispatch a CLI command
///
/// `log_path` is where the interactive session logs, if anywhere.
pub async fn dispatch(command: Commands, log_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Run {
            seed,
            output_dir,
            stdout,
            username,
        } => {
            interactive::run(RunOptions {
                seed,
                output_dir,
                stdout,
                username,
                log_path,
            })
            .await
        }

        Commands::Scenario {
            path,
            output_dir,
            verbose,
        } => {
            let options = ScenarioOptions {
                verbose,
                output_dir,
            };
            let result = scenario::run_scenario(&path, &options).await?;

            if result.passed {
                Ok(())
            } else {
                Err(Error::ScenarioAssertion(format!(
                    "'{}' failed at step {}/{}: {}",
                    result.name,
                    result.steps_run,
                    result.steps_total,
                    result.error.unwrap_or_default()
                )))
            }
        }

        Commands::User { set, clear } => {
            let store = ProfileStore::open_default().ok_or_else(|| {
                Error::Config("Could not determine the profile location".to_string())
            })?;

            if clear {
                store.forget_username()?;
                println!("Remembered username cleared");
            } else if let Some(name) = set {
                if name.trim().is_empty() {
                    return Err(Error::Config("Username cannot be empty".to_string()));
                }
                store.remember_username(&name)?;
                println!("Username set to {}", name.trim());
            } else {
                match store.remembered_username()? {
                    Some(name) => println!("{}", name),
                    None => println!("No username remembered"),
                }
            }
            Ok(())
        }

        Commands::Catalog { json } => {
            let config = Config::load()?;
            if json {
                #[derive(Serialize)]
                struct CatalogJson<'a> {
                    websites: &'a [WebsiteDefinition],
                    app_tests: &'a [AppTestDefinition],
                }

                let out = CatalogJson {
                    websites: &config.websites,
                    app_tests: &config.app_tests,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_catalog(&config);
            }
            Ok(())
        }
    }
}

fn print_catalog(config: &Config) {
    println!("{}", "Website checks:".bold());
    if config.websites.is_empty() {
        println!("  (none)");
    }
    for (i, site) in config.websites.iter().enumerate() {
        println!("  {:>2}. {:<20} {}", i + 1, site.name, site.url);
    }

    println!("\n{}", "Application tests:".bold());
    if config.app_tests.is_empty() {
        println!("  (none)");
    }
    for (i, test) in config.app_tests.iter().enumerate() {
        println!("  {:>2}. {:<20} {}", i + 1, test.name, test.description);
        if let Some(url) = &test.url {
            println!("      {}", url.dimmed());
        }
    }
}
