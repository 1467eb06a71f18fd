//! CLI-specific error types and exit codes.

use depresearch_core::{ConfigError, LifecycleError, PathError};
use depresearch_runtime::AgentClientError;
use thiserror::Error;

/// Remediation printed whenever the API key is missing.
pub const SET_API_KEY_HINT: &str = "dpr config set api-key <your-openrouter-key>";

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid value, unknown key or unreadable config file.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No API key configured. Run:\n\n  {}\n", SET_API_KEY_HINT)]
    MissingApiKey,

    /// Spawn failure, health-wait timeout or registry failure.
    #[error(transparent)]
    Server(LifecycleError),

    #[error("Failed to get response from agent: {0}")]
    Agent(#[from] AgentClientError),

    #[error(transparent)]
    Paths(#[from] PathError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Argument misuse not caught by clap.
    #[error("Invalid arguments: {0}")]
    Usage(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// - 1: any fatal condition
    /// - 2: misuse of the command line (matches clap's own usage errors)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}

impl From<LifecycleError> for CliError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::MissingApiKey => Self::MissingApiKey,
            LifecycleError::Config(e) => Self::Config(e),
            other => Self::Server(other),
        }
    }
}
