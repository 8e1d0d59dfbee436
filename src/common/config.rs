//! Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Public IP lookup settings
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Simulator timing and randomness
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Default diagnostic targets
    #[serde(default)]
    pub defaults: Defaults,

    /// Report delivery settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Website checks offered during the website step
    #[serde(default = "default_websites")]
    pub websites: Vec<WebsiteDefinition>,

    /// Manual application tests offered during the application step
    #[serde(default = "default_app_tests")]
    pub app_tests: Vec<AppTestDefinition>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup: LookupConfig::default(),
            simulation: SimulationConfig::default(),
            defaults: Defaults::default(),
            report: ReportConfig::default(),
            websites: default_websites(),
            app_tests: default_app_tests(),
        }
    }
}

/// A website that can be checked for reachability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebsiteDefinition {
    pub name: String,
    pub url: String,
}

/// A manual application test step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppTestDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
}

fn website(name: &str, url: &str) -> WebsiteDefinition {
    WebsiteDefinition {
        name: name.to_string(),
        url: url.to_string(),
    }
}

fn app_test(name: &str, description: &str, url: Option<&str>) -> AppTestDefinition {
    AppTestDefinition {
        name: name.to_string(),
        description: description.to_string(),
        url: url.map(str::to_string),
    }
}

fn default_websites() -> Vec<WebsiteDefinition> {
    vec![
        website("Google", "https://www.google.com"),
        website("Microsoft 365", "https://www.office.com"),
        website("Company Portal", "https://portal.company.local"),
        website("SharePoint", "https://company.sharepoint.com"),
    ]
}

fn default_app_tests() -> Vec<AppTestDefinition> {
    vec![
        app_test("Outlook", "Send and receive a test email", None),
        app_test(
            "Teams",
            "Join a test meeting and share the screen",
            Some("https://teams.microsoft.com"),
        ),
        app_test("File Share", "Open a document from the network drive", None),
        app_test("Printing", "Print a test page to the default printer", None),
    ]
}

/// A website success rate must be a probability (NaN is rejected too)
pub fn check_success_rate(rate: f64) -> std::result::Result<(), String> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(format!("must be between 0 and 1, got {}", rate))
    }
}

/// Public IP lookup settings
#[derive(Debug, Deserialize)]
pub struct LookupConfig {
    /// Geolocation endpoint returning {ip, hostname, city, region, country, loc, org}
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_lookup_timeout")]
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_lookup_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://ipinfo.io/json".to_string()
}
fn default_lookup_timeout() -> u64 {
    10
}

/// Simulator settings
#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Artificial delay before a simulated website check resolves
    #[serde(default = "default_website_delay")]
    pub website_delay_ms: u64,

    /// Probability that a simulated website check succeeds
    #[serde(default = "default_success_rate")]
    pub website_success_rate: f64,

    /// Delay before the ping output appears
    #[serde(default = "default_ping_delay")]
    pub ping_delay_ms: u64,

    /// Interval between traceroute hops
    #[serde(default = "default_tracert_interval")]
    pub tracert_interval_ms: u64,

    /// Replace simulated website checks with real HTTP requests
    #[serde(default)]
    pub live_website_checks: bool,

    /// Fixed seed for reproducible sessions
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            website_delay_ms: default_website_delay(),
            website_success_rate: default_success_rate(),
            ping_delay_ms: default_ping_delay(),
            tracert_interval_ms: default_tracert_interval(),
            live_website_checks: false,
            seed: None,
        }
    }
}

fn default_website_delay() -> u64 {
    1000
}
fn default_success_rate() -> f64 {
    0.9
}
fn default_ping_delay() -> u64 {
    1000
}
fn default_tracert_interval() -> u64 {
    300
}

/// Default diagnostic targets
#[derive(Debug, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_ping_target")]
    pub ping_target: String,

    #[serde(default = "default_tracert_target")]
    pub tracert_target: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            ping_target: default_ping_target(),
            tracert_target: default_tracert_target(),
        }
    }
}

fn default_ping_target() -> String {
    "8.8.8.8".to_string()
}
fn default_tracert_target() -> String {
    "www.google.com".to_string()
}

/// Report delivery settings
#[derive(Debug, Deserialize, Default)]
pub struct ReportConfig {
    /// Directory reports are written to; defaults to the data dir
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;

        check_success_rate(config.simulation.website_success_rate).map_err(|e| {
            super::Error::ConfigParse(format!("simulation.website_success_rate {}", e))
        })?;
        Ok(config)
    }

    /// Directory reports are delivered to
    pub fn report_dir(&self) -> Option<PathBuf> {
        self.report
            .output_dir
            .clone()
            .or_else(super::paths::reports_dir)
    }
}
