//! Session data model
//!
//! A [`Session`] is the single mutable aggregate of a UAT run: the
//! configuration committed at start, the append-only result lists, the
//! network diagnostic snapshot and the free-text comment.

mod network;

pub use network::{DiagnosticCapture, NetworkInfoSnapshot, PublicIpInfo};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::Error;

/// How the workstation under test is connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(rename = "LAN", alias = "lan")]
    Lan,
    #[serde(rename = "WLAN", alias = "wlan")]
    Wlan,
    #[serde(rename = "VPN", alias = "vpn")]
    Vpn,
}

impl ConnectionType {
    pub const ALL: [ConnectionType; 3] = [Self::Lan, Self::Wlan, Self::Vpn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lan => "LAN",
            Self::Wlan => "WLAN",
            Self::Vpn => "VPN",
        }
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LAN" => Ok(Self::Lan),
            "WLAN" | "WIFI" | "WI-FI" => Ok(Self::Wlan),
            "VPN" => Ok(Self::Vpn),
            _ => Err(Error::UnknownConnectionType(s.to_string())),
        }
    }
}

/// Who is running the session and on which machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub hostname: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            username: "Unknown User".to_string(),
            hostname: "Unknown Host".to_string(),
        }
    }
}

impl Identity {
    /// Resolve the hostname from the environment, keeping the given username
    pub fn detect(username: Option<String>) -> Self {
        let defaults = Self::default();
        let hostname = ["HOSTNAME", "COMPUTERNAME"]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or(defaults.hostname);

        Self {
            username: username
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.username),
            hostname,
        }
    }
}

/// Configuration committed when the session starts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionConfig {
    pub change_number: String,
    pub connection_type: Option<ConnectionType>,
    pub test_date: Option<DateTime<Utc>>,
    pub username: String,
    pub hostname: String,
}

/// Outcome of any test entry, as tallied in summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Success,
    Failure,
    Skipped,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" | "pass" | "ok" => Ok(Self::Success),
            "failure" | "fail" | "failed" => Ok(Self::Failure),
            "skipped" | "skip" => Ok(Self::Skipped),
            _ => Err(Error::UnknownStatus(s.to_string())),
        }
    }
}

/// Website checks never report a skip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteStatus {
    Success,
    Failure,
}

impl From<WebsiteStatus> for TestStatus {
    fn from(status: WebsiteStatus) -> Self {
        match status {
            WebsiteStatus::Success => TestStatus::Success,
            WebsiteStatus::Failure => TestStatus::Failure,
        }
    }
}

/// Result of one website reachability check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebsiteTestResult {
    pub name: String,
    pub url: String,
    pub status: WebsiteStatus,
    pub status_code: u16,
    pub notes: String,
}

/// Result of one manual application test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppTestResult {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub status: TestStatus,
    pub notes: String,
}

/// Root aggregate of a UAT run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub config: SessionConfig,
    website_tests: Vec<WebsiteTestResult>,
    app_tests: Vec<AppTestResult>,
    pub network: NetworkInfoSnapshot,
    pub comments: String,
}

impl Session {
    /// Create an empty session for the given identity
    pub fn new(identity: &Identity) -> Self {
        Self {
            config: SessionConfig {
                username: identity.username.clone(),
                hostname: identity.hostname.clone(),
                ..SessionConfig::default()
            },
            ..Self::default()
        }
    }

    /// Website results in the order they were recorded
    pub fn website_tests(&self) -> &[WebsiteTestResult] {
        &self.website_tests
    }

    /// Application results in the order they were recorded
    pub fn app_tests(&self) -> &[AppTestResult] {
        &self.app_tests
    }

    /// Append a website result; retests add a new entry
    pub fn record_website(&mut self, result: WebsiteTestResult) -> &WebsiteTestResult {
        self.website_tests.push(result);
        &self.website_tests[self.website_tests.len() - 1]
    }

    /// Append an application result
    pub fn record_app_test(&mut self, result: AppTestResult) -> &AppTestResult {
        self.app_tests.push(result);
        &self.app_tests[self.app_tests.len() - 1]
    }

    /// True when nothing has been recorded beyond the identity
    pub fn is_pristine(&self) -> bool {
        self.config.change_number.is_empty()
            && self.config.connection_type.is_none()
            && self.website_tests.is_empty()
            && self.app_tests.is_empty()
            && self.network.is_empty()
            && self.comments.is_empty()
    }
}
