//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the lifecycle manager expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No HTTP client or signal types in any signature
//! - Intent-based methods (`is_alive`, `terminate`), not syscalls
//! - Only the health probe is async; filesystem ports stay synchronous

pub mod config_store;
pub mod health_probe;
pub mod process_registry;
pub mod server_launcher;

pub use config_store::ConfigStore;
pub use health_probe::HealthProbe;
pub use process_registry::{ProcessRegistry, RegistryError, RegistryLock};
pub use server_launcher::{LaunchError, LaunchRequest, ServerLauncher};
