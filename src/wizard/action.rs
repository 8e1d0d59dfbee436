//! User actions and their outcomes
//!
//! Both front-ends (interactive prompt and YAML scenarios) express what
//! the user does as an [`Action`] and hand it to [`Wizard::perform`].

use serde::Deserialize;

use super::controller::Wizard;
use super::step::{Progress, WizardStep};
use crate::common::Result;
use crate::lookup::IpLookup;
use crate::notice::Notice;
use crate::report::{Delivery, ReportSink};
use crate::session::{
    AppTestResult, ConnectionType, DiagnosticCapture, PublicIpInfo, TestStatus, WebsiteStatus,
    WebsiteTestResult,
};
use crate::simulate::TraceHop;

/// Something the user does in the wizard
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Commit the configuration and begin testing
    Start {
        change_number: String,
        #[serde(default)]
        connection_type: Option<ConnectionType>,
    },
    /// Check a website by catalog index, name or URL
    TestWebsite { site: String },
    /// Look up the public IP
    PublicIp,
    IpConfig,
    Ping {
        #[serde(default)]
        target: Option<String>,
    },
    Tracert {
        #[serde(default)]
        target: Option<String>,
    },
    WlanInfo,
    /// Record a manual application test by catalog index or name
    AppTest {
        test: String,
        status: TestStatus,
        #[serde(default)]
        notes: Option<String>,
    },
    Comment { text: String },
    Next,
    SaveReport,
    Reset,
}

/// Result of a performed action
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Started(Progress),
    Advanced(Progress),
    Reset(Progress),
    Website(WebsiteTestResult),
    PublicIp(PublicIpInfo),
    IpConfig(String),
    Ping(DiagnosticCapture),
    Tracert(DiagnosticCapture),
    WlanInfo(String),
    AppTest(AppTestResult),
    Comment,
    Saved(Delivery),
}

impl Outcome {
    /// Notice to flash for this outcome, if any
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Outcome::Website(r) => Some(match r.status {
                WebsiteStatus::Success => Notice::success(format!("Successfully connected to {}", r.url)),
                WebsiteStatus::Failure => Notice::error(format!("Failed to connect to {}", r.url)),
            }),
            Outcome::AppTest(r) => {
                let message = format!("Test \"{}\" marked as {}", r.name, r.status);
                Some(match r.status {
                    TestStatus::Success => Notice::success(message),
                    TestStatus::Failure => Notice::error(message),
                    TestStatus::Skipped => Notice::info(message),
                })
            }
            Outcome::Saved(delivery) => Some(Notice::success(format!("Report saved to {}", delivery))),
            Outcome::Reset(_) => Some(Notice::info("Started a new test session")),
            _ => None,
        }
    }

    /// Plain-text rendering of the outcome
    pub fn render(&self) -> String {
        match self {
            Outcome::Started(p) | Outcome::Advanced(p) => format!(
                "Step {} of {}: {}",
                p.step.ordinal(),
                WizardStep::TOTAL,
                p.step
            ),
            Outcome::Reset(_) => "Started a new test session".to_string(),
            Outcome::Website(r) => format!(
                "{} ({}): {} [{}] {}",
                r.name,
                r.url,
                TestStatus::from(r.status),
                r.status_code,
                r.notes
            ),
            Outcome::PublicIp(info) => info.describe(),
            Outcome::IpConfig(text) | Outcome::WlanInfo(text) => text.clone(),
            Outcome::Ping(capture) | Outcome::Tracert(capture) => capture.output.clone(),
            Outcome::AppTest(r) => format!("Test \"{}\" marked as {}", r.name, r.status),
            Outcome::Comment => "Comment saved".to_string(),
            Outcome::Saved(delivery) => format!("Report saved to {}", delivery),
        }
    }
}

/// Receives progress while an action is in flight
///
/// This is the hook a rendering layer uses to show pending indicators
/// and stream traceroute hops.
pub trait WizardObserver {
    /// An asynchronous action started
    fn pending(&mut self, _what: &str) {}
    /// The pending action resolved, successfully or not
    fn settled(&mut self) {}
    /// A traceroute hop was emitted
    fn hop(&mut self, _hop: &TraceHop) {}
}

/// Observer that ignores everything
pub struct NullObserver;

impl WizardObserver for NullObserver {}

/// External collaborators an action may need
pub struct Services<'a> {
    pub lookup: &'a dyn IpLookup,
    pub sink: &'a dyn ReportSink,
    pub observer: &'a mut dyn WizardObserver,
}

impl Wizard {
    /// Perform one user action
    pub async fn perform(&mut self, action: Action, services: &mut Services<'_>) -> Result<Outcome> {
        tracing::debug!(?action, step = %self.step(), "Performing action");

        match action {
            Action::Start {
                change_number,
                connection_type,
            } => self.start(&change_number, connection_type).map(Outcome::Started),

            Action::Next => self.advance().map(Outcome::Advanced),

            Action::Reset => Ok(Outcome::Reset(self.reset())),

            Action::TestWebsite { site } => {
                self.require("test a website", WizardStep::WebsiteTests)?;
                let site = self.catalog().website(&site)?;
                services.observer.pending(&format!("Testing {}", site.url));
                let result = self.test_website(&site).await;
                services.observer.settled();
                result.map(Outcome::Website)
            }

            Action::PublicIp => {
                services.observer.pending("Loading IP information");
                let result = self.fetch_public_ip(services.lookup).await;
                services.observer.settled();
                result.map(Outcome::PublicIp)
            }

            Action::IpConfig => self.capture_ip_config().map(Outcome::IpConfig),

            Action::Ping { target } => {
                let label = target.as_deref().unwrap_or(&self.settings().ping_target).to_string();
                services.observer.pending(&format!("Pinging {}", label));
                let result = self.run_ping(target.as_deref()).await;
                services.observer.settled();
                result.map(Outcome::Ping)
            }

            Action::Tracert { target } => {
                let observer = &mut *services.observer;
                self.run_tracert(target.as_deref(), &mut |hop| observer.hop(hop))
                    .await
                    .map(Outcome::Tracert)
            }

            Action::WlanInfo => self.capture_wlan_info().map(Outcome::WlanInfo),

            Action::AppTest {
                test,
                status,
                notes,
            } => {
                self.require("record an application test", WizardStep::AppTests)?;
                let test = self.catalog().app_test(&test)?;
                self.record_app_test(&test, status, notes)
                    .map(Outcome::AppTest)
            }

            Action::Comment { text } => self.set_comment(&text).map(|_| Outcome::Comment),

            Action::SaveReport => self.save_report(services.sink).map(Outcome::Saved),
        }
    }
}
