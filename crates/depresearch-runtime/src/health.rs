//! HTTP health checking for the research server.
//!
//! Intentionally minimal: one GET, success status or not. Polling lives in
//! `depresearch_core::wait_until_healthy`.

use std::time::Duration;

use async_trait::async_trait;
use depresearch_core::HealthProbe;
use reqwest::Client;
use tracing::debug;

/// Liveness endpoint exposed by the agent server.
pub const HEALTH_PATH: &str = "/api/agents";

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_HOST: &str = "localhost";

#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: Client,
    host: String,
}

impl HttpHealthProbe {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self {
            client,
            host: DEFAULT_HOST.to_string(),
        })
    }

    /// Probe a host other than `localhost`.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    fn url(&self, port: u16) -> String {
        format!("http://{}:{port}{HEALTH_PATH}", self.host)
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn is_healthy(&self, port: u16) -> bool {
        let url = self.url(port);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(%url, status = %response.status(), "health check returned non-success");
                false
            }
            Err(e) => {
                debug!(%url, error = %e, "health check failed");
                false
            }
        }
    }
}
