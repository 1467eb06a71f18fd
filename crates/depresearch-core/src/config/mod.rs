//! Configuration domain types and the file-backed store.
//!
//! Two files make up the persisted configuration:
//! - `config.json` holds [`Configuration`] (port and model)
//! - `.env` holds the API key, so the JSON can be shared without leaking it

mod error;
mod file_store;
mod key;
mod secret;

use serde::{Deserialize, Serialize};

pub use error::ConfigError;
pub use file_store::FileConfigStore;
pub use key::ConfigKey;
pub use secret::mask_secret;

/// Default port for the background research server.
pub const DEFAULT_PORT: u16 = 7891;

/// Default model identifier handed to the research agent.
pub const DEFAULT_MODEL: &str = "openrouter/anthropic/claude-haiku-4.5";

/// Name of the variable holding the API key, in `.env` and in the server's environment.
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

const OPENROUTER_PREFIX: &str = "openrouter/";

/// Persisted non-secret configuration.
///
/// Missing fields fall back to their defaults so older files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// Port the background server listens on.
    pub port: u16,

    /// Model identifier, e.g. `anthropic/claude-haiku-4.5`.
    pub model: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Configuration {
    /// The model identifier as the server expects it, with the `openrouter/` prefix.
    #[must_use]
    pub fn server_model(&self) -> String {
        ensure_openrouter_model(&self.model)
    }
}

/// Prefix `model` with `openrouter/` unless it already carries it.
#[must_use]
pub fn ensure_openrouter_model(model: &str) -> String {
    if model.starts_with(OPENROUTER_PREFIX) {
        model.to_string()
    } else {
        format!("{OPENROUTER_PREFIX}{model}")
    }
}

/// Parse a user-supplied port.
///
/// Accepts only a plain integer in `1..=65535`; `"8080abc"` and `"0"` are rejected.
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u16>() {
        Ok(port) if port != 0 && !trimmed.starts_with('+') => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_string())),
    }
}
