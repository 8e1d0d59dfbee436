//! Terminal rendering for the interactive wizard

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::notice::{Notice, NoticeLevel};
use crate::report::{ResultsView, Stats};
use crate::session::{Identity, TestStatus};
use crate::simulate::TraceHop;
use crate::wizard::{Catalog, Outcome, Progress, StepStatus, Wizard, WizardObserver, WizardStep};

/// One-line step bar, e.g. `[✓] Configuration  [●] Website Tests  [ ] ...  25%`
pub fn progress_line(progress: &Progress) -> String {
    let steps: Vec<String> = WizardStep::ALL
        .iter()
        .zip(progress.indicators.iter())
        .map(|(step, status)| {
            let mark = match status {
                StepStatus::Completed => "✓",
                StepStatus::Active => "●",
                StepStatus::Pending => " ",
            };
            format!("[{}] {}", mark, step.title())
        })
        .collect();
    format!("{}  {:.0}%", steps.join("  "), progress.percent())
}

pub fn banner(identity: &Identity) {
    println!("\n{}", "User Acceptance Test".blue().bold());
    println!(
        "  {}",
        format!("User: {} | Computer: {}", identity.username, identity.hostname).dimmed()
    );
}

pub fn notice(notice: &Notice) {
    let text = match notice.level {
        NoticeLevel::Error => format!("✗ {}", notice.message).red(),
        NoticeLevel::Success => format!("✓ {}", notice.message).green(),
        NoticeLevel::Info => format!("ℹ {}", notice.message).cyan(),
    };
    println!("{}", text);
}

/// Describe the current step and what can be done in it
pub fn step_intro(wizard: &Wizard) {
    let progress = wizard.progress();
    println!("\n{}", progress_line(&progress).dimmed());
    println!(
        "{} {}",
        format!("Step {}/{}:", progress.step.ordinal(), WizardStep::TOTAL).blue().bold(),
        progress.step.title().white().bold()
    );
    step_help(progress.step, wizard.catalog());
}

pub fn step_help(step: WizardStep, catalog: &Catalog) {
    match step {
        WizardStep::Config => {
            println!("  Enter: start <change number> <LAN|WLAN|VPN>");
        }
        WizardStep::WebsiteTests => {
            for (i, site) in catalog.websites.iter().enumerate() {
                println!("  {:>2}. {} {}", i + 1, site.name, site.url.dimmed());
            }
            println!("  Commands: <n> | test <name|url> | ip | next");
        }
        WizardStep::NetworkInfo => {
            println!("  Commands: ipconfig | ping [target] | tracert [target] | wlan | next");
        }
        WizardStep::AppTests => {
            for (i, test) in catalog.app_tests.iter().enumerate() {
                println!("  {:>2}. {} {}", i + 1, test.name, test.description.dimmed());
            }
            println!("  Commands: <n|name> <pass|fail|skip> [notes] | next");
        }
        WizardStep::Results => {
            println!("  Commands: show | comment <text> | save | new");
        }
    }
    println!("  {}", "help | status | reset | quit".dimmed());
}

fn stats_line(label: &str, stats: &Stats) -> String {
    format!(
        "  {:<18} {:>7} {:>7} {:>7} {:>7}",
        label, stats.success, stats.failure, stats.skipped, stats.total
    )
}

pub fn results(view: &ResultsView) {
    println!("\n{}", "Summary".cyan().bold());
    println!(
        "  {:<18} {:>7} {:>7} {:>7} {:>7}",
        "Category", "Success", "Failed", "Skipped", "Total"
    );
    println!("{}", stats_line("Website Tests", &view.website));
    println!("{}", stats_line("Application Tests", &view.app));
    println!("{}", stats_line("Overall", &view.overall).bold());

    if !view.details.is_empty() {
        println!("\n{}", "Details".cyan().bold());
        for row in &view.details {
            let status = match row.status {
                TestStatus::Success => row.status.as_str().green(),
                TestStatus::Failure => row.status.as_str().red(),
                TestStatus::Skipped => row.status.as_str().dimmed(),
            };
            println!("  {:<8} {} {} {}", status, row.name, row.detail.dimmed(), row.notes);
        }
    }

    if !view.network_summary.is_empty() {
        println!("\n{}", "Network Information".cyan().bold());
        println!("{}", view.network_summary.trim_end());
    }
}

pub fn outcome(outcome: &Outcome) {
    match outcome {
        // Hops were already streamed by the observer
        Outcome::Tracert(_) => {}
        Outcome::IpConfig(_)
        | Outcome::WlanInfo(_)
        | Outcome::Ping(_)
        | Outcome::PublicIp(_) => println!("{}", outcome.render().trim_end()),
        _ => {}
    }
    if let Some(n) = outcome.notice() {
        notice(&n);
    }
}

/// Shows a spinner while an action is pending and streams traceroute hops
#[derive(Default)]
pub struct TerminalObserver {
    spinner: Option<ProgressBar>,
    tracing_started: bool,
}

impl WizardObserver for TerminalObserver {
    fn pending(&mut self, what: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.yellow} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("{}...", what));
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn settled(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn hop(&mut self, hop: &TraceHop) {
        if !self.tracing_started {
            self.tracing_started = true;
            println!("Tracing route...");
        }
        print!("{}", hop.line());
    }
}
