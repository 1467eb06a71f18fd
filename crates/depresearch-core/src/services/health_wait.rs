//! Bounded polling of the health probe.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::ports::HealthProbe;

/// Retry budget for waiting on a starting server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl HealthPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    #[must_use]
    pub const fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Total sleep time across all attempts, excluding probe latency.
    #[must_use]
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_INTERVAL)
    }
}

/// The server never reported healthy within the policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Server on port {port} did not become healthy after {attempts} attempts ({waited:?})")]
pub struct HealthTimeout {
    pub port: u16,
    pub attempts: u32,
    pub waited: Duration,
}

/// Poll `probe` until healthy or the attempts run out.
///
/// Sleeps `interval` between attempts but not after the last one. Returns the
/// 1-based attempt that succeeded.
pub async fn wait_until_healthy(
    probe: &dyn HealthProbe,
    port: u16,
    policy: HealthPolicy,
) -> Result<u32, HealthTimeout> {
    let started = tokio::time::Instant::now();

    for attempt in 1..=policy.max_attempts {
        if probe.is_healthy(port).await {
            debug!(port, attempt, "server healthy");
            return Ok(attempt);
        }
        debug!(port, attempt, max = policy.max_attempts, "server not healthy yet");

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }

    Err(HealthTimeout {
        port,
        attempts: policy.max_attempts,
        waited: started.elapsed(),
    })
}
