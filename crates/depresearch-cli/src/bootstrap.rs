//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - File-backed config store (via depresearch-core)
//! - PID file registry, HTTP health probe and detached launcher (via depresearch-runtime)
//! - Lifecycle manager and config service (via depresearch-core)
//!
//! Command handlers receive the fully-composed context and delegate to it.

use std::sync::Arc;

use anyhow::Result;
use depresearch_core::{
    AppPaths, ConfigService, ConfigStore, FileConfigStore, HealthPolicy, HealthProbe,
    LifecycleManager, ProcessRegistry, ServerLauncher,
};
use depresearch_runtime::{
    AgentClient, AgentClientError, DetachedLauncher, HttpHealthProbe, PidFileRegistry,
};

const DEFAULT_PROBE_HOST: &str = "localhost";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Where configuration and runtime state live.
    pub paths: AppPaths,
    /// Retry budget while waiting for the server to become healthy.
    pub health_policy: HealthPolicy,
    /// Host the server is reached on.
    pub probe_host: String,
}

impl CliConfig {
    /// Create config with paths resolved from the environment.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::with_paths(AppPaths::resolve()?))
    }

    /// Create config rooted at explicit paths.
    pub fn with_paths(paths: AppPaths) -> Self {
        Self {
            paths,
            health_policy: HealthPolicy::default(),
            probe_host: DEFAULT_PROBE_HOST.to_string(),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    paths: AppPaths,
    config: Arc<dyn ConfigStore>,
    config_service: ConfigService,
    registry: Arc<dyn ProcessRegistry>,
    lifecycle: LifecycleManager,
    probe_host: String,
}

impl CliContext {
    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Access the raw config store.
    pub fn config(&self) -> &Arc<dyn ConfigStore> {
        &self.config
    }

    /// Typed get/set for `dpr config`.
    pub fn config_service(&self) -> &ConfigService {
        &self.config_service
    }

    pub fn registry(&self) -> &Arc<dyn ProcessRegistry> {
        &self.registry
    }

    /// Access the lifecycle manager for server operations.
    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    /// Client for the agent server on `port`.
    pub fn agent_client(&self, port: u16) -> Result<AgentClient, AgentClientError> {
        AgentClient::with_base_url(format!("http://{}:{port}", self.probe_host))
    }
}

/// Bootstrap the CLI application.
///
/// Builds every adapter once from the resolved paths and composes them into
/// a [`CliContext`]. Nothing here touches the filesystem or network.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let paths = config.paths;

    // 1. Config store
    let store: Arc<dyn ConfigStore> = Arc::new(FileConfigStore::from_paths(&paths));

    // 2. OS and network adapters
    let registry: Arc<dyn ProcessRegistry> = Arc::new(PidFileRegistry::from_paths(&paths));
    let probe: Arc<dyn HealthProbe> =
        Arc::new(HttpHealthProbe::new()?.with_host(config.probe_host.clone()));
    let launcher: Arc<dyn ServerLauncher> = Arc::new(DetachedLauncher::from_paths(&paths));

    // 3. Core services
    let lifecycle = LifecycleManager::new(
        Arc::clone(&store),
        Arc::clone(&registry),
        probe,
        launcher,
        paths.workspace_dir(),
    )
    .with_policy(config.health_policy);
    let config_service = ConfigService::new(Arc::clone(&store));

    Ok(CliContext {
        paths,
        config: store,
        config_service,
        registry,
        lifecycle,
        probe_host: config.probe_host,
    })
}
