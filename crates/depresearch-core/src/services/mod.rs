//! Core services - orchestration over the port traits.
//!
//! Services here don't know about concrete implementations; the CLI wires
//! them to the runtime adapters at start-up.

mod config_service;
mod health_wait;
mod lifecycle;

pub use config_service::ConfigService;
pub use health_wait::{HealthPolicy, HealthTimeout, wait_until_healthy};
pub use lifecycle::{EnsureOutcome, LifecycleError, LifecycleManager, ServerStatus, StopOutcome};
