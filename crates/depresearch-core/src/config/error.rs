use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, validating or persisting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown config key: {0}\nValid keys: api-key, model, port")]
    UnknownKey(String),

    #[error("Invalid port: {0} (must be an integer between 1 and 65535)")]
    InvalidPort(String),

    #[error("Model cannot be empty")]
    EmptyModel,

    #[error("API key cannot be empty")]
    EmptyApiKey,

    #[error("API key cannot contain control characters such as newlines")]
    InvalidApiKey,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
