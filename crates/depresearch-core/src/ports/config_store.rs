//! Configuration storage port.

use crate::config::{ConfigError, Configuration};

/// Persistent storage for [`Configuration`] and the API key.
///
/// Reads never fail for a missing file: they fall back to defaults (or `None`
/// for the secret). Writes replace the whole file atomically.
pub trait ConfigStore: Send + Sync {
    /// Load the persisted configuration, or defaults if none exists.
    fn read(&self) -> Result<Configuration, ConfigError>;

    /// Replace the persisted configuration.
    fn write(&self, config: &Configuration) -> Result<(), ConfigError>;

    /// The API key, if one is stored and non-empty.
    fn get_secret(&self) -> Result<Option<String>, ConfigError>;

    /// Overwrite the stored API key.
    fn set_secret(&self, value: &str) -> Result<(), ConfigError>;
}
