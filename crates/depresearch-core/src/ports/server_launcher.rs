//! Background server launch port.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::mask_secret;

/// Everything the server needs, passed through its environment.
#[derive(Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub port: u16,
    /// Model identifier, already carrying the `openrouter/` prefix.
    pub model: String,
    pub api_key: String,
    pub workspace_dir: PathBuf,
}

impl fmt::Debug for LaunchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchRequest")
            .field("port", &self.port)
            .field("model", &self.model)
            .field("api_key", &mask_secret(&self.api_key))
            .field("workspace_dir", &self.workspace_dir)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to spawn server: {0}")]
    Spawn(String),

    #[error("Server directory not found: {0}")]
    MissingServerDir(PathBuf),
}

/// Starts the server detached from the calling terminal.
pub trait ServerLauncher: Send + Sync {
    /// Spawn the server and return its PID without waiting for it.
    fn launch(&self, request: &LaunchRequest) -> Result<u32, LaunchError>;
}
