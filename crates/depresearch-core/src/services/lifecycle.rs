//! Lifecycle manager - guarantees one healthy background server.
//!
//! Composes the config store, process registry, health probe and launcher.
//! `ensure_running` is the precondition of every research request; `stop`
//! and `status` back the corresponding CLI commands.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::health_wait::{HealthPolicy, HealthTimeout, wait_until_healthy};
use crate::config::ConfigError;
use crate::ports::{
    ConfigStore, HealthProbe, LaunchError, LaunchRequest, ProcessRegistry, RegistryError,
    RegistryLock, ServerLauncher,
};

/// Errors from lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("No API key configured")]
    MissingApiKey,

    /// The process is left running; it may still become healthy.
    #[error("{source}. Process {pid} is still running; check the server log or run `dpr stop`")]
    HealthTimeout {
        pid: u32,
        #[source]
        source: HealthTimeout,
    },

    /// A recorded process is alive but never answered on the configured port.
    #[error(
        "{source}. Recorded server process {pid} is alive but not answering on port {port}; \
         if the port changed since it started, run `dpr stop` and try again",
        port = .source.port
    )]
    RecordedUnresponsive {
        pid: u32,
        #[source]
        source: HealthTimeout,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LifecycleError {
    /// Whether a server process was left running without becoming healthy.
    pub const fn is_health_timeout(&self) -> bool {
        matches!(
            self,
            Self::HealthTimeout { .. } | Self::RecordedUnresponsive { .. }
        )
    }
}

/// How `ensure_running` obtained a healthy server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// A server was already answering on the port.
    AlreadyHealthy { port: u16 },
    /// The recorded process was starting; we waited for it instead of spawning.
    Adopted { pid: u32, port: u16 },
    /// A new server was spawned and became healthy.
    Spawned { pid: u32, port: u16 },
}

impl EnsureOutcome {
    #[must_use]
    pub const fn port(self) -> u16 {
        match self {
            Self::AlreadyHealthy { port } | Self::Adopted { port, .. } | Self::Spawned { port, .. } => {
                port
            }
        }
    }
}

/// Result of `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    NotRunning,
    /// The record was removed; `signalled` is whether a live process was told to exit.
    Stopped { pid: u32, signalled: bool },
}

impl fmt::Display for StopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRunning => write!(f, "Server is not running."),
            Self::Stopped {
                pid,
                signalled: true,
            } => write!(f, "Stopped server (PID {pid})."),
            Self::Stopped {
                pid,
                signalled: false,
            } => write!(f, "Server PID {pid} was not running; removed stale PID file."),
        }
    }
}

/// Observed server state. Computing it never mutates anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    NotRunning,
    Stale { pid: u32 },
    Unresponsive { pid: u32, port: u16 },
    Healthy { pid: u32, port: u16 },
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRunning => write!(f, "Server is not running (no PID file found)."),
            Self::Stale { pid } => write!(f, "Server PID {pid} is stale (process not found)."),
            Self::Unresponsive { pid, port } => write!(
                f,
                "Server process is alive (PID {pid}) but not responding on port {port}."
            ),
            Self::Healthy { pid, port } => {
                write!(f, "Server is running (PID {pid}, port {port}).")
            }
        }
    }
}

/// Orchestrates the background server's lifecycle.
pub struct LifecycleManager {
    config: Arc<dyn ConfigStore>,
    registry: Arc<dyn ProcessRegistry>,
    probe: Arc<dyn HealthProbe>,
    launcher: Arc<dyn ServerLauncher>,
    workspace_dir: PathBuf,
    policy: HealthPolicy,
}

impl LifecycleManager {
    pub fn new(
        config: Arc<dyn ConfigStore>,
        registry: Arc<dyn ProcessRegistry>,
        probe: Arc<dyn HealthProbe>,
        launcher: Arc<dyn ServerLauncher>,
        workspace_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            registry,
            probe,
            launcher,
            workspace_dir: workspace_dir.into(),
            policy: HealthPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: HealthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn policy(&self) -> HealthPolicy {
        self.policy
    }

    /// Make sure a healthy server is listening on the configured port.
    ///
    /// Spawns at most one process, and only when no healthy server exists and
    /// no recorded process is still alive. Spawn-and-record runs under the
    /// registry lock so concurrent invocations cannot both spawn.
    pub async fn ensure_running(&self) -> Result<EnsureOutcome, LifecycleError> {
        let config = self.config.read()?;
        let port = config.port;

        if self.probe.is_healthy(port).await {
            debug!(port, "server already healthy");
            return Ok(EnsureOutcome::AlreadyHealthy { port });
        }

        let _lock = self.acquire_lock().await?;

        // Another invocation may have finished starting the server while we waited.
        if self.probe.is_healthy(port).await {
            debug!(port, "server became healthy while waiting for lock");
            return Ok(EnsureOutcome::AlreadyHealthy { port });
        }

        if let Some(pid) = self.registry.read_pid() {
            if self.registry.is_alive(pid) {
                info!(pid, port, "server process alive but not ready, waiting for it");
                return match wait_until_healthy(self.probe.as_ref(), port, self.policy).await {
                    Ok(_) => Ok(EnsureOutcome::Adopted { pid, port }),
                    Err(source) => Err(LifecycleError::RecordedUnresponsive { pid, source }),
                };
            }
            warn!(pid, "removing stale PID file");
            self.registry.remove()?;
        }

        let api_key = self
            .config
            .get_secret()?
            .ok_or(LifecycleError::MissingApiKey)?;

        let request = LaunchRequest {
            port,
            model: config.server_model(),
            api_key,
            workspace_dir: self.workspace_dir.clone(),
        };
        debug!(?request, "launching server");
        let pid = self.launcher.launch(&request)?;

        if let Err(e) = self.registry.write_pid(pid) {
            // Without a record the process could never be stopped; don't leave it behind.
            if let Err(kill_err) = self.registry.terminate(pid) {
                warn!(pid, error = %kill_err, "failed to stop unrecorded server process");
            }
            return Err(e.into());
        }
        info!(pid, port, "started research server");

        match wait_until_healthy(self.probe.as_ref(), port, self.policy).await {
            Ok(attempt) => {
                info!(pid, port, attempt, "research server is ready");
                Ok(EnsureOutcome::Spawned { pid, port })
            }
            Err(source) => Err(LifecycleError::HealthTimeout { pid, source }),
        }
    }

    /// Stop the recorded server, if any, and remove its record.
    pub fn stop(&self) -> Result<StopOutcome, LifecycleError> {
        let Some(pid) = self.registry.read_pid() else {
            return Ok(StopOutcome::NotRunning);
        };

        let mut signalled = false;
        if self.registry.is_alive(pid) {
            match self.registry.terminate(pid) {
                Ok(()) => signalled = true,
                Err(e) => warn!(pid, error = %e, "failed to signal server process"),
            }
        }

        self.registry.remove()?;
        info!(pid, signalled, "removed server PID file");
        Ok(StopOutcome::Stopped { pid, signalled })
    }

    /// Report the current server state without side effects.
    pub async fn status(&self) -> Result<ServerStatus, LifecycleError> {
        let Some(pid) = self.registry.read_pid() else {
            return Ok(ServerStatus::NotRunning);
        };
        if !self.registry.is_alive(pid) {
            return Ok(ServerStatus::Stale { pid });
        }

        let port = self.config.read()?.port;
        if self.probe.is_healthy(port).await {
            Ok(ServerStatus::Healthy { pid, port })
        } else {
            Ok(ServerStatus::Unresponsive { pid, port })
        }
    }

    async fn acquire_lock(&self) -> Result<RegistryLock, LifecycleError> {
        let registry = Arc::clone(&self.registry);
        let lock = tokio::task::spawn_blocking(move || registry.lock())
            .await
            .map_err(|e| LifecycleError::Internal(format!("lock task failed: {e}")))??;
        Ok(lock)
    }
}
