//! Public IP lookup against a geolocation JSON service

use std::time::Duration;

use async_trait::async_trait;

use crate::common::config::LookupConfig;
use crate::common::{Error, Result};
use crate::session::PublicIpInfo;

/// Source of the workstation's public IP information
#[async_trait]
pub trait IpLookup: Send + Sync {
    async fn lookup(&self) -> Result<PublicIpInfo>;
}

/// Lookup over HTTP (ipinfo.io compatible payload)
pub struct HttpIpLookup {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIpLookup {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl IpLookup for HttpIpLookup {
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn lookup(&self) -> Result<PublicIpInfo> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| Error::Transport(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let info: PublicIpInfo =
            serde_json::from_str(&body).map_err(|e| Error::LookupParse(e.to_string()))?;

        tracing::info!(ip = %info.ip, "Public IP resolved");
        Ok(info)
    }
}

/// Lookup that answers from a fixed payload, for offline and scripted runs
pub struct FixedIpLookup {
    info: Option<PublicIpInfo>,
}

impl FixedIpLookup {
    pub fn new(info: Option<PublicIpInfo>) -> Self {
        Self { info }
    }
}

#[async_trait]
impl IpLookup for FixedIpLookup {
    async fn lookup(&self) -> Result<PublicIpInfo> {
        self.info
            .clone()
            .ok_or_else(|| Error::Transport("public IP lookup is disabled".to_string()))
    }
}
