//! Result aggregation for the results step

use std::fmt::Write;
use std::ops::Add;

use serde::Serialize;

use crate::session::{
    AppTestResult, NetworkInfoSnapshot, Session, TestStatus, WebsiteTestResult,
};

/// Anything whose outcome can be tallied
pub trait HasStatus {
    fn status(&self) -> TestStatus;
}

impl HasStatus for WebsiteTestResult {
    fn status(&self) -> TestStatus {
        self.status.into()
    }
}

impl HasStatus for AppTestResult {
    fn status(&self) -> TestStatus {
        self.status
    }
}

/// Outcome counts for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub success: usize,
    pub failure: usize,
    pub skipped: usize,
    pub total: usize,
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, other: Stats) -> Stats {
        Stats {
            success: self.success + other.success,
            failure: self.failure + other.failure,
            skipped: self.skipped + other.skipped,
            total: self.total + other.total,
        }
    }
}

/// Count outcomes; `total` is always the number of entries
pub fn calculate_stats<T: HasStatus>(results: &[T]) -> Stats {
    results.iter().fold(
        Stats {
            total: results.len(),
            ..Stats::default()
        },
        |mut stats, result| {
            match result.status() {
                TestStatus::Success => stats.success += 1,
                TestStatus::Failure => stats.failure += 1,
                TestStatus::Skipped => stats.skipped += 1,
            }
            stats
        },
    )
}

/// One row of the flattened details table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub name: String,
    /// URL for website checks, description for application tests
    pub detail: String,
    pub status: TestStatus,
    pub notes: String,
}

/// Everything the results step displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub website: Stats,
    pub app: Stats,
    pub overall: Stats,
    pub details: Vec<DetailRow>,
    pub network_summary: String,
}

/// Build the results view for a finished session
pub fn generate_results(session: &Session) -> ResultsView {
    let website = calculate_stats(session.website_tests());
    let app = calculate_stats(session.app_tests());

    let details = session
        .website_tests()
        .iter()
        .map(|t| DetailRow {
            name: t.name.clone(),
            detail: t.url.clone(),
            status: t.status.into(),
            notes: t.notes.clone(),
        })
        .chain(session.app_tests().iter().map(|t| DetailRow {
            name: t.name.clone(),
            detail: t.description.clone(),
            status: t.status,
            notes: t.notes.clone(),
        }))
        .collect();

    ResultsView {
        website,
        app,
        overall: website + app,
        details,
        network_summary: network_summary(&session.network),
    }
}

/// Concatenate the populated diagnostics into a readable summary
///
/// Fields that were never captured are left out entirely.
pub fn network_summary(network: &NetworkInfoSnapshot) -> String {
    let mut out = String::new();
    let or_na = |v: &Option<String>| v.as_deref().unwrap_or("N/A").to_string();

    if let Some(ip) = &network.public_ip {
        let _ = write!(
            out,
            "Public IP Information:\nIP: {}\nLocation: {}, {}, {}\nOrganization: {}\n\n",
            ip.ip,
            or_na(&ip.city),
            or_na(&ip.region),
            or_na(&ip.country),
            or_na(&ip.org),
        );
    }
    if let Some(ip_config) = &network.ip_config {
        let _ = write!(out, "IP Configuration:\n{ip_config}\n\n");
    }
    if let Some(ping) = &network.ping {
        let _ = write!(out, "Ping Results ({}):\n{}\n\n", ping.target, ping.output);
    }
    if let Some(tracert) = &network.tracert {
        let _ = write!(
            out,
            "Traceroute Results ({}):\n{}\n\n",
            tracert.target, tracert.output
        );
    }
    if let Some(wlan) = &network.wlan_info {
        let _ = write!(out, "WLAN Information:\n{wlan}\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{DiagnosticCapture, Identity, PublicIpInfo, WebsiteStatus};

    fn app(status: TestStatus) -> AppTestResult {
        AppTestResult {
            name: "Outlook".to_string(),
            description: "Send mail".to_string(),
            url: None,
            status,
            notes: String::new(),
        }
    }

    fn site(status: WebsiteStatus) -> WebsiteTestResult {
        WebsiteTestResult {
            name: "Google".to_string(),
            url: "https://www.google.com".to_string(),
            status,
            status_code: 200,
            notes: "Site is accessible".to_string(),
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = calculate_stats::<AppTestResult>(&[]);
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_counts_sum_to_total() {
        let apps = vec![
            app(TestStatus::Success),
            app(TestStatus::Failure),
            app(TestStatus::Skipped),
            app(TestStatus::Skipped),
        ];
        let stats = calculate_stats(&apps);
        assert_eq!(
            stats,
            Stats {
                success: 1,
                failure: 1,
                skipped: 2,
                total: 4
            }
        );
        assert_eq!(stats.success + stats.failure + stats.skipped, stats.total);
    }

    #[test]
    fn test_websites_never_skip() {
        let sites = vec![site(WebsiteStatus::Success), site(WebsiteStatus::Failure)];
        let stats = calculate_stats(&sites);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.total, 2);
    }

    #[test]
    fn test_generate_results_orders_details() {
        let mut session = Session::new(&Identity::default());
        session.record_app_test(app(TestStatus::Skipped));
        session.record_website(site(WebsiteStatus::Success));
        session.record_website(site(WebsiteStatus::Failure));

        let view = generate_results(&session);
        assert_eq!(view.overall, view.website + view.app);
        assert_eq!(view.overall.total, 3);
        assert_eq!(view.details.len(), 3);
        assert_eq!(view.details[0].detail, "https://www.google.com");
        assert_eq!(view.details[1].status, TestStatus::Failure);
        assert_eq!(view.details[2].detail, "Send mail");
        assert_eq!(view.network_summary, "");
    }

    #[test]
    fn test_network_summary_omits_missing_fields() {
        let network = NetworkInfoSnapshot {
            public_ip: Some(PublicIpInfo {
                ip: "203.0.113.9".to_string(),
                hostname: None,
                city: Some("Bern".to_string()),
                region: Some("BE".to_string()),
                country: Some("CH".to_string()),
                loc: None,
                org: None,
            }),
            ping: Some(DiagnosticCapture {
                target: "8.8.8.8".to_string(),
                output: "pong".to_string(),
            }),
            ..NetworkInfoSnapshot::default()
        };

        let summary = network_summary(&network);
        assert!(summary.starts_with("Public IP Information:\nIP: 203.0.113.9\n"));
        assert!(summary.contains("Location: Bern, BE, CH\n"));
        assert!(summary.contains("Organization: N/A\n\n"));
        assert!(summary.contains("Ping Results (8.8.8.8):\npong\n\n"));
        assert!(!summary.contains("IP Configuration"));
        assert!(!summary.contains("Traceroute"));
        assert!(!summary.contains("WLAN"));
    }
}
