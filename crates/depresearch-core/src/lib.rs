//! Core domain types, ports and lifecycle logic for depresearch.
//!
//! This crate owns everything that does not talk to the operating system's
//! process table or the network directly:
//!
//! - [`paths`]: the per-user configuration directory and every file under it
//! - [`config`]: the JSON configuration file and the API key secret file
//! - [`ports`]: trait seams for the process registry, health probe and launcher
//! - [`services`]: the lifecycle manager that keeps exactly one healthy server
//!
//! OS and network adapters live in `depresearch-runtime`; the CLI composes
//! both at its bootstrap.

pub mod config;
pub mod paths;
pub mod ports;
pub mod services;
pub mod utils;

pub use config::{
    API_KEY_VAR, ConfigError, ConfigKey, Configuration, DEFAULT_MODEL, DEFAULT_PORT,
    FileConfigStore, ensure_openrouter_model, mask_secret, parse_port,
};
pub use paths::{AppPaths, PathError, ensure_directory};
pub use ports::{
    ConfigStore, HealthProbe, LaunchError, LaunchRequest, ProcessRegistry, RegistryError,
    RegistryLock, ServerLauncher,
};
pub use services::{
    ConfigService, EnsureOutcome, HealthPolicy, HealthTimeout, LifecycleError, LifecycleManager,
    ServerStatus, StopOutcome, wait_until_healthy,
};
