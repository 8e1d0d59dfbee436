//! Interactive wizard session
//!
//! Reads commands line by line from stdin, hands them to the [`Wizard`]
//! and renders outcomes. The terminal belongs to the wizard here, so
//! diagnostics go to the log file set up by the caller.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::input::{parse_input, Input};
use super::render::{self, TerminalObserver};
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::lookup::HttpIpLookup;
use crate::notice::{Notice, NoticeBoard};
use crate::profile::ProfileStore;
use crate::report::{DirectorySink, ReportSink, StdoutSink};
use crate::session::Identity;
use crate::wizard::{Catalog, Services, Wizard, WizardSettings, WizardStep};

/// Options for an interactive session
#[derive(Debug, Default)]
pub struct RunOptions {
    pub seed: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub stdout: bool,
    pub username: Option<String>,
    /// Where diagnostics are being logged, shown on exit
    pub log_path: Option<PathBuf>,
}

type StdinLines = Lines<BufReader<Stdin>>;

fn prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

/// Username from the flag, the remembered profile, or a prompt
async fn resolve_username(
    flag: Option<String>,
    store: Option<&ProfileStore>,
    lines: &mut StdinLines,
) -> Result<Option<String>> {
    if let Some(name) = flag.filter(|n| !n.trim().is_empty()) {
        return Ok(Some(name));
    }

    if let Some(store) = store {
        match store.remembered_username() {
            Ok(Some(name)) => return Ok(Some(name)),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Could not read profile"),
        }
    }

    prompt("Your name: ");
    let line = lines.next_line().await?;
    Ok(line
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty()))
}

fn report_sink(options: &RunOptions, config: &Config) -> Result<Box<dyn ReportSink>> {
    if options.stdout {
        return Ok(Box::new(StdoutSink));
    }
    let dir = options
        .output_dir
        .clone()
        .or_else(|| config.report_dir())
        .ok_or_else(|| Error::Config("Could not determine a report directory".to_string()))?;
    Ok(Box::new(DirectorySink::new(dir)))
}

/// Run the wizard until the user quits or stdin closes
pub async fn run(options: RunOptions) -> Result<()> {
    let config = Config::load()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let store = ProfileStore::open_default();
    let username = resolve_username(options.username.clone(), store.as_ref(), &mut lines).await?;
    if let (Some(store), Some(name)) = (&store, &username) {
        if let Err(e) = store.remember_username(name) {
            tracing::warn!(error = %e, "Could not remember username");
        }
    }

    let identity = Identity::detect(username);
    let mut wizard = Wizard::new(
        identity.clone(),
        Catalog::from_config(&config),
        WizardSettings::from_config(&config),
        options.seed.or(config.simulation.seed),
    )?;
    let lookup = HttpIpLookup::from_config(&config.lookup)?;
    let sink = report_sink(&options, &config)?;
    let mut observer = TerminalObserver::default();
    let mut board = NoticeBoard::default();

    tracing::info!(user = %identity.username, host = %identity.hostname, "Interactive session started");

    render::banner(&identity);
    render::step_intro(&wizard);

    loop {
        prompt(&format!("{} ", "uat>".bold()));
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let input = match parse_input(wizard.step(), &line) {
            Ok(input) => input,
            Err(e) => {
                let notice = Notice::from(&e);
                render::notice(&notice);
                board.post(notice);
                continue;
            }
        };

        match input {
            Input::Noop => {}
            Input::Quit => break,
            Input::Help => render::step_help(wizard.step(), wizard.catalog()),
            Input::Status => {
                println!("{}", render::progress_line(&wizard.progress()));
                if let Some(notice) = board.current(Instant::now()) {
                    render::notice(notice);
                }
            }
            Input::ShowResults => {
                if let Some(view) = wizard.results() {
                    render::results(view);
                }
            }
            Input::Action(action) => {
                let before = wizard.step();
                let mut services = Services {
                    lookup: &lookup,
                    sink: sink.as_ref(),
                    observer: &mut observer,
                };

                match wizard.perform(action, &mut services).await {
                    Ok(outcome) => {
                        render::outcome(&outcome);
                        if let Some(notice) = outcome.notice() {
                            board.post(notice);
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, kind = %e.kind(), "Action rejected");
                        let notice = Notice::from(&e);
                        render::notice(&notice);
                        board.post(notice);
                    }
                }

                if wizard.step() != before {
                    render::step_intro(&wizard);
                    if wizard.step() == WizardStep::Results {
                        if let Some(view) = wizard.results() {
                            render::results(view);
                        }
                    }
                }
            }
        }
    }

    if let Some(path) = &options.log_path {
        println!("{}", format!("Log: {}", path.display()).dimmed());
    }
    Ok(())
}
