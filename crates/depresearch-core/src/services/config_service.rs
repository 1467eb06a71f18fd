//! Config service - typed get/set over the config store.

use std::sync::Arc;

use crate::config::{ConfigError, ConfigKey, parse_port};
use crate::ports::ConfigStore;

/// Validates and applies `dpr config` operations.
pub struct ConfigService {
    store: Arc<dyn ConfigStore>,
}

impl ConfigService {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Validate `value` for `key` and persist it.
    ///
    /// Validation happens before anything is written, so a rejected value
    /// leaves the previous one in place.
    pub fn set(&self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        match key {
            ConfigKey::ApiKey => self.store.set_secret(value.trim()),
            ConfigKey::Model => {
                let model = value.trim();
                if model.is_empty() {
                    return Err(ConfigError::EmptyModel);
                }
                let mut config = self.store.read()?;
                config.model = model.to_string();
                self.store.write(&config)
            }
            ConfigKey::Port => {
                let port = parse_port(value)?;
                let mut config = self.store.read()?;
                config.port = port;
                self.store.write(&config)
            }
        }
    }

    /// Current raw value for `key`; `None` only for an unset API key.
    pub fn get(&self, key: ConfigKey) -> Result<Option<String>, ConfigError> {
        match key {
            ConfigKey::ApiKey => self.store.get_secret(),
            ConfigKey::Model => Ok(Some(self.store.read()?.model)),
            ConfigKey::Port => Ok(Some(self.store.read()?.port.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Configuration, DEFAULT_MODEL};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        config: Mutex<Configuration>,
        secret: Mutex<Option<String>>,
        writes: Mutex<u32>,
    }

    impl ConfigStore for MemoryStore {
        fn read(&self) -> Result<Configuration, ConfigError> {
            Ok(self.config.lock().unwrap().clone())
        }
        fn write(&self, config: &Configuration) -> Result<(), ConfigError> {
            *self.writes.lock().unwrap() += 1;
            *self.config.lock().unwrap() = config.clone();
            Ok(())
        }
        fn get_secret(&self) -> Result<Option<String>, ConfigError> {
            Ok(self.secret.lock().unwrap().clone())
        }
        fn set_secret(&self, value: &str) -> Result<(), ConfigError> {
            *self.secret.lock().unwrap() = Some(value.to_string());
            Ok(())
        }
    }

    #[test]
    fn port_round_trips() {
        let store = Arc::new(MemoryStore::default());
        let service = ConfigService::new(store);

        service.set(ConfigKey::Port, "9000").unwrap();
        assert_eq!(service.get(ConfigKey::Port).unwrap().as_deref(), Some("9000"));
    }

    #[test]
    fn invalid_port_leaves_previous_value() {
        let store = Arc::new(MemoryStore::default());
        let service = ConfigService::new(Arc::clone(&store) as Arc<dyn ConfigStore>);
        service.set(ConfigKey::Port, "9000").unwrap();

        let err = service.set(ConfigKey::Port, "70000").unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPort(_)));
        assert_eq!(store.read().unwrap().port, 9000);
        assert_eq!(*store.writes.lock().unwrap(), 1);
    }

    #[test]
    fn model_is_trimmed_and_must_not_be_empty() {
        let store = Arc::new(MemoryStore::default());
        let service = ConfigService::new(store);

        assert_eq!(service.get(ConfigKey::Model).unwrap().as_deref(), Some(DEFAULT_MODEL));
        assert!(matches!(
            service.set(ConfigKey::Model, "   "),
            Err(ConfigError::EmptyModel)
        ));

        service.set(ConfigKey::Model, " openai/gpt-4o ").unwrap();
        assert_eq!(
            service.get(ConfigKey::Model).unwrap().as_deref(),
            Some("openai/gpt-4o")
        );
    }

    #[test]
    fn api_key_unset_is_none() {
        let service = ConfigService::new(Arc::new(MemoryStore::default()));
        assert_eq!(service.get(ConfigKey::ApiKey).unwrap(), None);

        service.set(ConfigKey::ApiKey, "sk-or-v1-abc").unwrap();
        assert_eq!(
            service.get(ConfigKey::ApiKey).unwrap().as_deref(),
            Some("sk-or-v1-abc")
        );
    }
}
