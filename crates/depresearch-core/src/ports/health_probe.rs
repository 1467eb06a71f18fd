//! Server health probing port.

use async_trait::async_trait;

/// One-shot liveness check against the background server.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Whether the server on `port` answers its liveness endpoint with success.
    ///
    /// Transport errors and timeouts collapse to `false`; this never fails.
    async fn is_healthy(&self, port: u16) -> bool;
}
