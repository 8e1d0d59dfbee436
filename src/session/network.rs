//! Network diagnostic snapshot

use serde::{Deserialize, Serialize};

/// Payload of the public IP geolocation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIpInfo {
    pub ip: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub loc: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
}

impl PublicIpInfo {
    /// Multi-line description shown right after a lookup
    pub fn describe(&self) -> String {
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
        format!(
            "IP: {}\nHostname: {}\nCity: {}\nRegion: {}\nCountry: {}\nLocation: {}\nOrganization: {}\n",
            self.ip,
            field(&self.hostname),
            field(&self.city),
            field(&self.region),
            field(&self.country),
            field(&self.loc),
            field(&self.org),
        )
    }
}

/// Captured output of a targeted diagnostic (ping, traceroute)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticCapture {
    pub target: String,
    pub output: String,
}

/// Point-in-time network diagnostics; re-running a diagnostic overwrites its field
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkInfoSnapshot {
    pub public_ip: Option<PublicIpInfo>,
    pub ip_config: Option<String>,
    pub ping: Option<DiagnosticCapture>,
    pub tracert: Option<DiagnosticCapture>,
    pub wlan_info: Option<String>,
}

impl NetworkInfoSnapshot {
    pub fn is_empty(&self) -> bool {
        self.public_ip.is_none()
            && self.ip_config.is_none()
            && self.ping.is_none()
            && self.tracert.is_none()
            && self.wlan_info.is_none()
    }
}
