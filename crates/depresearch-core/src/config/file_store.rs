//! File-backed [`ConfigStore`] implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::secret::{read_api_key, render_api_key};
use super::{ConfigError, Configuration};
use crate::paths::AppPaths;
use crate::ports::ConfigStore;
use crate::utils::{write_atomic, write_atomic_private};

/// Stores [`Configuration`] as pretty JSON and the API key in a `.env` file.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    config_path: PathBuf,
    env_path: PathBuf,
}

impl FileConfigStore {
    pub fn new(config_path: impl Into<PathBuf>, env_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            env_path: env_path.into(),
        }
    }

    /// Store rooted at the resolved application directory.
    pub fn from_paths(paths: &AppPaths) -> Self {
        Self::new(paths.config_file(), paths.env_file())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn env_path(&self) -> &Path {
        &self.env_path
    }
}

impl ConfigStore for FileConfigStore {
    fn read(&self) -> Result<Configuration, ConfigError> {
        let contents = match fs::read_to_string(&self.config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Configuration::default());
            }
            Err(e) => return Err(ConfigError::io(&self.config_path, e)),
        };

        let config: Configuration =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: self.config_path.clone(),
                source,
            })?;

        if config.port == 0 {
            return Err(ConfigError::InvalidPort(config.port.to_string()));
        }
        Ok(config)
    }

    fn write(&self, config: &Configuration) -> Result<(), ConfigError> {
        let mut json = serde_json::to_string_pretty(config).map_err(ConfigError::Encode)?;
        json.push('\n');
        write_atomic(&self.config_path, &json).map_err(|e| ConfigError::io(&self.config_path, e))?;
        tracing::debug!(path = %self.config_path.display(), "wrote configuration");
        Ok(())
    }

    fn get_secret(&self) -> Result<Option<String>, ConfigError> {
        read_api_key(&self.env_path)
    }

    fn set_secret(&self, value: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        let content = render_api_key(value)?;
        write_atomic_private(&self.env_path, &content)
            .map_err(|e| ConfigError::io(&self.env_path, e))?;
        tracing::debug!(path = %self.env_path.display(), "wrote API key");
        Ok(())
    }
}
