//! Website reachability checks
//!
//! The default [`SimulatedChecker`] waits a fixed delay and then succeeds
//! with a configurable probability. [`HttpChecker`] issues a real GET for
//! deployments where the workstation can reach the sites directly.

use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;

use crate::common::{Error, Result};
use crate::session::WebsiteStatus;

pub const SUCCESS_NOTE: &str = "Site is accessible";
pub const FAILURE_NOTE: &str = "Connection failed";

/// Outcome of one reachability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteCheck {
    pub status: WebsiteStatus,
    pub status_code: u16,
    pub notes: String,
}

impl WebsiteCheck {
    pub fn success(status_code: u16) -> Self {
        Self {
            status: WebsiteStatus::Success,
            status_code,
            notes: SUCCESS_NOTE.to_string(),
        }
    }

    pub fn failure(status_code: u16) -> Self {
        Self {
            status: WebsiteStatus::Failure,
            status_code,
            notes: FAILURE_NOTE.to_string(),
        }
    }

    /// The request never produced a response
    pub fn error(message: &str) -> Self {
        Self {
            status: WebsiteStatus::Failure,
            status_code: 0,
            notes: format!("Error: {message}"),
        }
    }
}

/// Something that can tell whether a URL is reachable
#[async_trait]
pub trait WebsiteChecker: Send {
    async fn check(&mut self, url: &str) -> WebsiteCheck;
}

/// Delay-then-coin-flip stand-in for a real request
pub struct SimulatedChecker {
    delay: Duration,
    success_rate: f64,
    rng: StdRng,
}

impl SimulatedChecker {
    /// Rates outside `0.0..=1.0` are clamped; NaN never succeeds
    pub fn new(delay: Duration, success_rate: f64, rng: StdRng) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self {
            delay,
            success_rate,
            rng,
        }
    }
}

#[async_trait]
impl WebsiteChecker for SimulatedChecker {
    async fn check(&mut self, url: &str) -> WebsiteCheck {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let check = if self.rng.gen_bool(self.success_rate) {
            WebsiteCheck::success(200)
        } else {
            WebsiteCheck::failure(500)
        };
        tracing::debug!(url, status_code = check.status_code, "Simulated website check");
        check
    }
}

/// Real HTTP GET; 2xx and 3xx count as reachable
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebsiteChecker for HttpChecker {
    async fn check(&mut self, url: &str) -> WebsiteCheck {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(url, status = %status, "Website responded");
                if status.is_success() || status.is_redirection() {
                    WebsiteCheck::success(status.as_u16())
                } else {
                    WebsiteCheck::failure(status.as_u16())
                }
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Website check failed");
                WebsiteCheck::error(&e.to_string())
            }
        }
    }
}
