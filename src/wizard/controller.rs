//! Wizard controller
//!
//! Owns the [`Session`] and the current [`WizardStep`]. Every mutating
//! operation checks that the current step permits it, so the step index
//! alone determines what may change. Operations take `&mut self`, which
//! serializes them: a second website check or IP lookup cannot start
//! while the first is still pending.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::step::{Progress, WizardStep};
use crate::common::config::{AppTestDefinition, Config, WebsiteDefinition};
use crate::common::{Error, Result};
use crate::lookup::IpLookup;
use crate::report::{generate_results, Delivery, Report, ReportSink, ResultsView};
use crate::session::{
    AppTestResult, ConnectionType, DiagnosticCapture, Identity, PublicIpInfo, Session, TestStatus,
    WebsiteTestResult,
};
use crate::simulate::{
    self, tracert::trace_header, HttpChecker, SimulatedChecker, TraceHop, Traceroute,
    TracerouteTimer, WebsiteChecker,
};

/// Timing and targets used by the wizard's diagnostics
#[derive(Debug, Clone)]
pub struct WizardSettings {
    pub website_delay: Duration,
    pub website_success_rate: f64,
    pub ping_delay: Duration,
    pub tracert_interval: Duration,
    pub live_website_checks: bool,
    pub http_timeout: Duration,
    pub ping_target: String,
    pub tracert_target: String,
}

impl WizardSettings {
    pub fn from_config(config: &Config) -> Self {
        let sim = &config.simulation;
        Self {
            website_delay: Duration::from_millis(sim.website_delay_ms),
            website_success_rate: sim.website_success_rate,
            ping_delay: Duration::from_millis(sim.ping_delay_ms),
            tracert_interval: Duration::from_millis(sim.tracert_interval_ms),
            live_website_checks: sim.live_website_checks,
            http_timeout: Duration::from_secs(config.lookup.timeout_secs),
            ping_target: config.defaults.ping_target.clone(),
            tracert_target: config.defaults.tracert_target.clone(),
        }
    }
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Website checks and application tests offered by the wizard
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub websites: Vec<WebsiteDefinition>,
    pub app_tests: Vec<AppTestDefinition>,
}

impl Catalog {
    pub fn from_config(config: &Config) -> Self {
        Self {
            websites: config.websites.clone(),
            app_tests: config.app_tests.clone(),
        }
    }

    /// Resolve a website by 1-based index, name or URL
    ///
    /// An `http(s)://` URL outside the catalog is checked ad hoc.
    pub fn website(&self, query: &str) -> Result<WebsiteDefinition> {
        let query = query.trim();
        if let Some(site) = lookup(&self.websites, query, |w| [&w.name, &w.url]) {
            return Ok(site.clone());
        }
        if query.starts_with("http://") || query.starts_with("https://") {
            return Ok(WebsiteDefinition {
                name: query.to_string(),
                url: query.to_string(),
            });
        }
        Err(Error::UnknownWebsite(query.to_string()))
    }

    /// Resolve an application test by 1-based index or name
    pub fn app_test(&self, query: &str) -> Result<AppTestDefinition> {
        let query = query.trim();
        lookup(&self.app_tests, query, |t| [&t.name, &t.name])
            .cloned()
            .ok_or_else(|| Error::UnknownAppTest(query.to_string()))
    }
}

fn lookup<'a, T>(
    items: &'a [T],
    query: &str,
    keys: impl Fn(&T) -> [&String; 2],
) -> Option<&'a T> {
    if let Ok(index) = query.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| items.get(i));
    }
    items
        .iter()
        .find(|item| keys(item).iter().any(|k| k.eq_ignore_ascii_case(query)))
}

/// A committed step change
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRecord {
    pub from: WizardStep,
    pub to: WizardStep,
    pub at: DateTime<Utc>,
}

/// Linear state machine driving a UAT session
pub struct Wizard {
    step: WizardStep,
    session: Session,
    identity: Identity,
    catalog: Catalog,
    settings: WizardSettings,
    rng: StdRng,
    checker: Box<dyn WebsiteChecker>,
    results: Option<ResultsView>,
    transitions: Vec<TransitionRecord>,
}

impl Wizard {
    /// Create a wizard in the `Config` step
    ///
    /// With a seed, every simulated outcome is reproducible.
    pub fn new(
        identity: Identity,
        catalog: Catalog,
        settings: WizardSettings,
        seed: Option<u64>,
    ) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let checker: Box<dyn WebsiteChecker> = if settings.live_website_checks {
            Box::new(HttpChecker::new(settings.http_timeout)?)
        } else {
            Box::new(SimulatedChecker::new(
                settings.website_delay,
                settings.website_success_rate,
                StdRng::seed_from_u64(rng.gen()),
            ))
        };

        Ok(Self {
            step: WizardStep::Config,
            session: Session::new(&identity),
            identity,
            catalog,
            settings,
            rng,
            checker,
            results: None,
            transitions: Vec::new(),
        })
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn progress(&self) -> Progress {
        Progress::at(self.step)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    /// Results computed when the wizard entered the `Results` step
    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub(super) fn require(&self, action: &str, step: WizardStep) -> Result<()> {
        if self.step == step {
            Ok(())
        } else {
            Err(Error::invalid_state(action, self.step.title()))
        }
    }

    fn transition(&mut self, to: WizardStep) -> Progress {
        let record = TransitionRecord {
            from: self.step,
            to,
            at: Utc::now(),
        };
        tracing::info!(from = %record.from, to = %record.to, "Wizard transition");
        self.transitions.push(record);
        self.step = to;
        Progress::at(to)
    }

    // === Transitions ===

    /// Commit the configuration and move to the website tests
    ///
    /// Validation failures leave the wizard untouched.
    pub fn start(
        &mut self,
        change_number: &str,
        connection_type: Option<ConnectionType>,
    ) -> Result<Progress> {
        self.require("start the session", WizardStep::Config)?;

        let change_number = change_number.trim();
        if change_number.is_empty() {
            return Err(Error::MissingChangeNumber);
        }
        let connection_type = connection_type.ok_or(Error::MissingConnectionType)?;

        let config = &mut self.session.config;
        config.change_number = change_number.to_string();
        config.connection_type = Some(connection_type);
        config.test_date = Some(Utc::now());

        tracing::info!(change = change_number, connection = %connection_type, "Session started");
        Ok(self.transition(WizardStep::WebsiteTests))
    }

    /// Move to the next step; entering `Results` computes the results view
    pub fn advance(&mut self) -> Result<Progress> {
        let next = self
            .step
            .next()
            .ok_or_else(|| Error::invalid_transition(self.step.title()))?;

        if next == WizardStep::Results {
            self.results = Some(generate_results(&self.session));
        }
        Ok(self.transition(next))
    }

    /// Discard the session and return to `Config`
    pub fn reset(&mut self) -> Progress {
        tracing::info!(from = %self.step, "Session reset");
        self.session = Session::new(&self.identity);
        self.results = None;
        self.transitions.clear();
        self.step = WizardStep::Config;
        Progress::at(WizardStep::Config)
    }

    // === Website tests ===

    /// Check one website and append the result
    pub async fn test_website(&mut self, site: &WebsiteDefinition) -> Result<WebsiteTestResult> {
        self.require("test a website", WizardStep::WebsiteTests)?;

        let check = self.checker.check(&site.url).await;
        let result = WebsiteTestResult {
            name: site.name.clone(),
            url: site.url.clone(),
            status: check.status,
            status_code: check.status_code,
            notes: check.notes,
        };
        tracing::info!(url = %site.url, status_code = result.status_code, "Website tested");
        Ok(self.session.record_website(result).clone())
    }

    /// Look up the public IP; on failure the snapshot field stays unset
    pub async fn fetch_public_ip(&mut self, lookup: &dyn IpLookup) -> Result<PublicIpInfo> {
        self.require("look up the public IP", WizardStep::WebsiteTests)?;

        let info = lookup.lookup().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Public IP lookup failed");
        })?;
        self.session.network.public_ip = Some(info.clone());
        Ok(info)
    }

    // === Network diagnostics ===

    pub fn capture_ip_config(&mut self) -> Result<String> {
        self.require("capture the IP configuration", WizardStep::NetworkInfo)?;

        let output = simulate::simulate_ip_config(self.session.config.connection_type);
        self.session.network.ip_config = Some(output.clone());
        Ok(output)
    }

    /// Ping `target`, or the configured default target
    pub async fn run_ping(&mut self, target: Option<&str>) -> Result<DiagnosticCapture> {
        self.require("ping", WizardStep::NetworkInfo)?;

        let target = resolve_target(target, &self.settings.ping_target);
        if !self.settings.ping_delay.is_zero() {
            tokio::time::sleep(self.settings.ping_delay).await;
        }

        let capture = DiagnosticCapture {
            output: simulate::simulate_ping(&target),
            target,
        };
        tracing::debug!(target = %capture.target, "Ping captured");
        self.session.network.ping = Some(capture.clone());
        Ok(capture)
    }

    /// Trace the route to `target`, reporting each hop as it arrives
    ///
    /// The snapshot is committed only once the final hop has been emitted.
    pub async fn run_tracert(
        &mut self,
        target: Option<&str>,
        on_hop: &mut dyn FnMut(&TraceHop),
    ) -> Result<DiagnosticCapture> {
        self.require("trace a route", WizardStep::NetworkInfo)?;

        let target = resolve_target(target, &self.settings.tracert_target);
        let mut output = trace_header(&target);

        let trace = Traceroute::new(target.clone(), &mut self.rng);
        let mut timer = TracerouteTimer::new(trace, self.settings.tracert_interval);
        while let Some(hop) = timer.next_hop().await {
            output.push_str(&hop.line());
            on_hop(&hop);
        }

        let capture = DiagnosticCapture { target, output };
        tracing::debug!(target = %capture.target, "Traceroute captured");
        self.session.network.tracert = Some(capture.clone());
        Ok(capture)
    }

    pub fn capture_wlan_info(&mut self) -> Result<String> {
        self.require("capture WLAN information", WizardStep::NetworkInfo)?;

        let output = simulate::simulate_wlan_info(self.session.config.connection_type);
        self.session.network.wlan_info = Some(output.clone());
        Ok(output)
    }

    // === Application tests ===

    pub fn record_app_test(
        &mut self,
        test: &AppTestDefinition,
        status: TestStatus,
        notes: Option<String>,
    ) -> Result<AppTestResult> {
        self.require("record an application test", WizardStep::AppTests)?;

        let result = AppTestResult {
            name: test.name.clone(),
            description: test.description.clone(),
            url: test.url.clone(),
            status,
            notes: notes.unwrap_or_default(),
        };
        tracing::info!(test = %test.name, status = %status, "Application test recorded");
        Ok(self.session.record_app_test(result).clone())
    }

    // === Results ===

    pub fn set_comment(&mut self, text: &str) -> Result<()> {
        self.require("add a comment", WizardStep::Results)?;
        self.session.comments = text.to_string();
        Ok(())
    }

    pub fn build_report(&self, generated_at: DateTime<Utc>) -> Result<Report> {
        self.require("save the report", WizardStep::Results)?;
        Report::generate(&self.session, generated_at)
    }

    pub fn save_report(&self, sink: &dyn ReportSink) -> Result<Delivery> {
        let report = self.build_report(Utc::now())?;
        sink.deliver(&report)
    }
}

fn resolve_target(target: Option<&str>, default: &str) -> String {
    target
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::FixedIpLookup;
    use crate::session::WebsiteStatus;
    use crate::simulate::HOP_COUNT;

    fn settings() -> WizardSettings {
        WizardSettings {
            website_delay: Duration::ZERO,
            website_success_rate: 1.0,
            ping_delay: Duration::ZERO,
            tracert_interval: Duration::from_millis(1),
            ..WizardSettings::default()
        }
    }

    fn wizard() -> Wizard {
        Wizard::new(
            Identity {
                username: "alice".to_string(),
                hostname: "ws-01".to_string(),
            },
            Catalog::from_config(&Config::default()),
            settings(),
            Some(42),
        )
        .unwrap()
    }

    fn started(connection: ConnectionType) -> Wizard {
        let mut wizard = wizard();
        wizard.start("CHG0012345", Some(connection)).unwrap();
        wizard
    }

    fn ip_info() -> PublicIpInfo {
        PublicIpInfo {
            ip: "203.0.113.1".to_string(),
            hostname: None,
            city: Some("Baden".to_string()),
            region: Some("AG".to_string()),
            country: Some("CH".to_string()),
            loc: None,
            org: Some("AS1 Example".to_string()),
        }
    }

    #[test]
    fn test_start_commits_config() {
        for connection in ConnectionType::ALL {
            let mut wizard = wizard();
            let progress = wizard.start("  CHG0012345 ", Some(connection)).unwrap();

            assert_eq!(progress.step, WizardStep::WebsiteTests);
            assert_eq!(wizard.step(), WizardStep::WebsiteTests);
            let config = &wizard.session().config;
            assert_eq!(config.change_number, "CHG0012345");
            assert_eq!(config.connection_type, Some(connection));
            assert!(config.test_date.is_some());
            assert_eq!(wizard.transitions().len(), 1);
        }
    }

    #[test]
    fn test_start_validation() {
        let mut wizard = wizard();

        let err = wizard.start("   ", Some(ConnectionType::Lan)).unwrap_err();
        assert!(matches!(err, Error::MissingChangeNumber));

        let err = wizard.start("CHG1", None).unwrap_err();
        assert!(matches!(err, Error::MissingConnectionType));

        assert_eq!(wizard.step(), WizardStep::Config);
        assert!(wizard.session().is_pristine());
        assert!(wizard.transitions().is_empty());
    }

    #[test]
    fn test_start_only_from_config() {
        let mut wizard = started(ConnectionType::Lan);
        let err = wizard.start("CHG2", Some(ConnectionType::Vpn)).unwrap_err();
        assert!(matches!(err, Error::InvalidState { .. }));
        assert_eq!(wizard.session().config.change_number, "CHG0012345");
    }

    #[test]
    fn test_advance_path_and_terminal_step() {
        let mut wizard = wizard();
        assert!(matches!(
            wizard.advance().unwrap_err(),
            Error::InvalidTransition { .. }
        ));

        wizard.start("CHG1", Some(ConnectionType::Lan)).unwrap();
        assert_eq!(wizard.advance().unwrap().step, WizardStep::NetworkInfo);
        assert_eq!(wizard.advance().unwrap().step, WizardStep::AppTests);
        assert!(wizard.results().is_none());

        let progress = wizard.advance().unwrap();
        assert_eq!(progress.step, WizardStep::Results);
        assert_eq!(progress.fraction, 1.0);
        assert!(wizard.results().is_some());

        let err = wizard.advance().unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert_eq!(wizard.step(), WizardStep::Results);
    }

    #[tokio::test]
    async fn test_website_results_append() {
        let mut wizard = started(ConnectionType::Lan);
        let site = wizard.catalog().website("1").unwrap();

        let first = wizard.test_website(&site).await.unwrap();
        assert_eq!(first.status, WebsiteStatus::Success);
        assert_eq!(first.status_code, 200);
        wizard.test_website(&site).await.unwrap();

        assert_eq!(wizard.session().website_tests().len(), 2);
    }

    #[tokio::test]
    async fn test_actions_gated_by_step() {
        let mut wizard = wizard();
        let site = wizard.catalog().website("1").unwrap();

        assert!(wizard.test_website(&site).await.is_err());
        assert!(wizard.capture_ip_config().is_err());
        assert!(wizard.run_ping(None).await.is_err());
        assert!(wizard.set_comment("x").is_err());
        assert!(wizard.build_report(Utc::now()).is_err());

        wizard.start("CHG1", Some(ConnectionType::Wlan)).unwrap();
        let test = wizard.catalog().app_test("Outlook").unwrap();
        let err = wizard
            .record_app_test(&test, TestStatus::Success, None)
            .unwrap_err();
        assert_eq!(err.kind(), crate::common::ErrorKind::InvalidTransition);
        assert!(wizard.session().app_tests().is_empty());
    }

    #[tokio::test]
    async fn test_public_ip_failure_leaves_field_unset() {
        let mut wizard = started(ConnectionType::Lan);

        let err = wizard
            .fetch_public_ip(&FixedIpLookup::new(None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(wizard.session().network.public_ip.is_none());

        let info = wizard
            .fetch_public_ip(&FixedIpLookup::new(Some(ip_info())))
            .await
            .unwrap();
        assert_eq!(wizard.session().network.public_ip, Some(info));
    }

    #[tokio::test]
    async fn test_network_diagnostics() {
        let mut wizard = started(ConnectionType::Vpn);
        wizard.advance().unwrap();

        let ip_config = wizard.capture_ip_config().unwrap();
        assert!(ip_config.contains("PPP adapter VPN Connection"));
        assert!(ip_config.contains("10.10.10.100"));

        let ping = wizard.run_ping(Some("10.0.0.1")).await.unwrap();
        assert_eq!(ping.target, "10.0.0.1");
        assert!(ping.output.contains("Average = 10ms"));

        let default_ping = wizard.run_ping(Some("  ")).await.unwrap();
        assert_eq!(default_ping.target, wizard.settings().ping_target);

        let wlan = wizard.capture_wlan_info().unwrap();
        assert_eq!(wlan, simulate::NO_WIRELESS);

        let network = &wizard.session().network;
        assert_eq!(network.ping.as_ref(), Some(&default_ping));
        assert!(network.ip_config.is_some());
        assert!(network.wlan_info.is_some());
    }

    #[tokio::test]
    async fn test_tracert_streams_eight_hops_then_commits() {
        let mut wizard = started(ConnectionType::Lan);
        wizard.advance().unwrap();

        let mut hops = Vec::new();
        let capture = wizard
            .run_tracert(Some("example.com"), &mut |hop| hops.push(hop.clone()))
            .await
            .unwrap();

        assert_eq!(hops.len(), HOP_COUNT);
        assert_eq!(hops[0].address, simulate::tracert::GATEWAY);
        assert!(hops[HOP_COUNT - 1].is_final());
        assert!(capture.output.starts_with("Tracing route to example.com...\n"));
        assert!(capture.output.ends_with("Trace complete.\n"));
        assert_eq!(wizard.session().network.tracert, Some(capture));
    }

    #[tokio::test]
    async fn test_seeded_sessions_are_reproducible() {
        async fn trace() -> String {
            let mut wizard = started(ConnectionType::Lan);
            wizard.advance().unwrap();
            wizard.run_tracert(None, &mut |_| {}).await.unwrap().output
        }
        assert_eq!(trace().await, trace().await);
    }

    #[tokio::test]
    async fn test_results_and_comment() {
        let mut wizard = started(ConnectionType::Lan);
        let site = wizard.catalog().website("Google").unwrap();
        wizard.test_website(&site).await.unwrap();
        wizard.advance().unwrap();
        wizard.capture_ip_config().unwrap();
        wizard.advance().unwrap();

        for (query, status) in [
            ("1", TestStatus::Success),
            ("teams", TestStatus::Failure),
            ("Printing", TestStatus::Skipped),
        ] {
            let test = wizard.catalog().app_test(query).unwrap();
            wizard.record_app_test(&test, status, None).unwrap();
        }
        wizard.advance().unwrap();

        let results = wizard.results().unwrap();
        assert_eq!(results.website.total, 1);
        assert_eq!(results.app.skipped, 1);
        assert_eq!(results.overall.total, 4);
        assert!(results.network_summary.starts_with("IP Configuration:\n"));

        wizard.set_comment("All good").unwrap();
        let report = wizard.build_report(Utc::now()).unwrap();
        assert!(report.contents.ends_with("Comments:\n\"All good\"\n"));
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let mut wizard = started(ConnectionType::Wlan);
        let site = wizard.catalog().website("2").unwrap();
        wizard.test_website(&site).await.unwrap();
        wizard.advance().unwrap();
        wizard.capture_wlan_info().unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        wizard.set_comment("note").unwrap();

        let progress = wizard.reset();
        assert_eq!(progress.step, WizardStep::Config);
        assert!(wizard.session().is_pristine());
        assert!(wizard.results().is_none());
        assert_eq!(wizard.session().config.username, "alice");

        // Same inputs behave as on a fresh wizard
        let progress = wizard.start("CHG0012345", Some(ConnectionType::Wlan)).unwrap();
        assert_eq!(progress.step, WizardStep::WebsiteTests);
        assert!(wizard.session().website_tests().is_empty());
        assert!(wizard.session().network.is_empty());
        assert!(wizard.session().comments.is_empty());
    }

    #[test]
    fn test_catalog_resolution() {
        let catalog = Catalog::from_config(&Config::default());
        assert_eq!(catalog.website("2").unwrap().name, "Microsoft 365");
        assert_eq!(catalog.website("GOOGLE").unwrap().url, "https://www.google.com");
        assert_eq!(
            catalog.website("https://www.office.com").unwrap().name,
            "Microsoft 365"
        );
        assert_eq!(
            catalog.website("https://adhoc.example").unwrap().name,
            "https://adhoc.example"
        );
        assert!(matches!(catalog.website("0"), Err(Error::UnknownWebsite(_))));
        assert!(matches!(catalog.website("nope"), Err(Error::UnknownWebsite(_))));
        assert!(matches!(catalog.app_test("99"), Err(Error::UnknownAppTest(_))));
    }
}
