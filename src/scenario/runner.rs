//! Scenario runner
//!
//! Drives a [`Wizard`] through the actions of a YAML scenario and checks
//! each step's expectations against the structured outcome rather than
//! terminal output.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::common::config::{check_success_rate, Config};
use crate::common::{Error, Result};
use crate::lookup::{FixedIpLookup, HttpIpLookup, IpLookup};
use crate::report::{DirectorySink, ReportSink};
use crate::session::Identity;
use crate::wizard::{
    Action, Catalog, Outcome, Services, Wizard, WizardObserver, WizardSettings,
};

use super::config::{Expectation, Scenario, ScenarioStep};

/// Result of a scenario run
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    pub error: Option<String>,
}

/// How to run a scenario
#[derive(Debug, Default, Clone)]
pub struct ScenarioOptions {
    pub verbose: bool,
    /// Directory saved reports go to (default: configured report dir)
    pub output_dir: Option<PathBuf>,
}

/// Load a scenario from a YAML file
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse scenario '{}': {}", path.display(), e)))
}

/// Run a scenario from a YAML file
pub async fn run_scenario(path: &Path, options: &ScenarioOptions) -> Result<ScenarioResult> {
    let scenario = load_scenario(path)?;
    let config = Config::load()?;

    let dir = options
        .output_dir
        .clone()
        .or_else(|| config.report_dir())
        .ok_or_else(|| Error::Config("Could not determine a report directory".to_string()))?;
    let sink = DirectorySink::new(dir);

    execute(scenario, &config, &sink, options.verbose).await
}

/// Settings for a scenario: configured values with its overrides applied
fn scenario_settings(scenario: &Scenario, config: &Config) -> Result<WizardSettings> {
    let mut settings = WizardSettings::from_config(config);
    if let Some(rate) = scenario.success_rate {
        check_success_rate(rate).map_err(|e| {
            Error::Config(format!("Scenario '{}': success_rate {}", scenario.name, e))
        })?;
        settings.website_success_rate = rate;
    }
    if scenario.instant {
        settings.website_delay = std::time::Duration::ZERO;
        settings.ping_delay = std::time::Duration::ZERO;
        settings.tracert_interval = std::time::Duration::ZERO;
        settings.live_website_checks = false;
    }
    Ok(settings)
}

/// Prints traceroute hops in verbose mode
struct ScenarioObserver {
    verbose: bool,
}

impl WizardObserver for ScenarioObserver {
    fn hop(&mut self, hop: &crate::simulate::TraceHop) {
        if self.verbose {
            print!("      {}", hop.line().trim_start());
        }
    }
}

/// Run an already loaded scenario
pub async fn execute(
    scenario: Scenario,
    config: &Config,
    sink: &dyn ReportSink,
    verbose: bool,
) -> Result<ScenarioResult> {
    let steps_total = scenario.steps.len();
    let settings = scenario_settings(&scenario, config)?;

    println!(
        "\n{} {}",
        "Running Scenario:".blue().bold(),
        scenario.name.white().bold()
    );
    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }

    let lookup: Box<dyn IpLookup> = match &scenario.public_ip {
        Some(info) => Box::new(FixedIpLookup::new(Some(info.clone()))),
        None => Box::new(HttpIpLookup::from_config(&config.lookup)?),
    };

    let mut wizard = Wizard::new(
        Identity::detect(scenario.username.clone()),
        Catalog::from_config(config),
        settings,
        scenario.seed,
    )?;
    let mut observer = ScenarioObserver { verbose };

    println!("\n{}", "Steps:".cyan());

    for (i, step) in scenario.steps.iter().enumerate() {
        let step_num = i + 1;
        let label = describe(&step.action);

        let mut services = Services {
            lookup: lookup.as_ref(),
            sink,
            observer: &mut observer,
        };
        let result = wizard.perform(step.action.clone(), &mut services).await;

        match check_step(step, result, &wizard) {
            Ok(rendered) => {
                println!("  {} Step {}: {}", "✓".green(), step_num, label.dimmed());
                if verbose {
                    for line in rendered.lines().filter(|l| !l.is_empty()) {
                        println!("      {}", line.dimmed());
                    }
                }
            }
            Err(e) => {
                let message = match e {
                    Error::ScenarioAssertion(message) => message,
                    other => other.to_string(),
                };
                println!("  {} Step {}: {}", "✗".red(), step_num, message);
                return Ok(ScenarioResult {
                    name: scenario.name,
                    passed: false,
                    steps_run: step_num,
                    steps_total,
                    error: Some(message),
                });
            }
        }
    }

    println!(
        "\n{} {}\n",
        "✓".green().bold(),
        "Scenario Passed".green().bold()
    );

    Ok(ScenarioResult {
        name: scenario.name,
        passed: true,
        steps_run: steps_total,
        steps_total,
        error: None,
    })
}

/// Compare a step's result with its expectation
///
/// Returns the rendered outcome (or error message) on success.
fn check_step(step: &ScenarioStep, result: Result<Outcome>, wizard: &Wizard) -> Result<String> {
    let default = Expectation::default();
    let expect = step.expect.as_ref().unwrap_or(&default);

    let rendered = match (result, expect.expects_failure()) {
        (Ok(outcome), false) => outcome.render(),
        (Ok(_), true) => {
            return Err(Error::ScenarioAssertion(
                "expected the action to fail, but it succeeded".to_string(),
            ))
        }
        (Err(e), false) => {
            return Err(Error::ScenarioAssertion(format!("action failed: {}", e)))
        }
        (Err(e), true) => {
            if let Some(kind) = expect.error {
                if e.kind() != kind {
                    return Err(Error::ScenarioAssertion(format!(
                        "expected a {} error, got {} ({})",
                        kind,
                        e.kind(),
                        e
                    )));
                }
            }
            e.to_string()
        }
    };

    if let Some(needle) = &expect.output_contains {
        if !rendered.contains(needle.as_str()) {
            return Err(Error::ScenarioAssertion(format!(
                "expected output to contain '{}', got '{}'",
                needle,
                rendered.trim_end()
            )));
        }
    }

    if let Some(expected) = expect.step {
        if wizard.step() != expected {
            return Err(Error::ScenarioAssertion(format!(
                "expected to be at the {} step, but at the {} step",
                expected,
                wizard.step()
            )));
        }
    }

    Ok(rendered)
}

/// Short description of an action for progress lines
fn describe(action: &Action) -> String {
    match action {
        Action::Start {
            change_number,
            connection_type,
        } => match connection_type {
            Some(t) => format!("start {} {}", change_number, t),
            None => format!("start {}", change_number),
        },
        Action::TestWebsite { site } => format!("test website {}", site),
        Action::PublicIp => "public ip".to_string(),
        Action::IpConfig => "ipconfig".to_string(),
        Action::Ping { target } => match target {
            Some(t) => format!("ping {}", t),
            None => "ping".to_string(),
        },
        Action::Tracert { target } => match target {
            Some(t) => format!("tracert {}", t),
            None => "tracert".to_string(),
        },
        Action::WlanInfo => "wlan info".to_string(),
        Action::AppTest { test, status, .. } => format!("app test {} {}", test, status),
        Action::Comment { .. } => "comment".to_string(),
        Action::Next => "next".to_string(),
        Action::SaveReport => "save report".to_string(),
        Action::Reset => "reset".to_string(),
    }
}
