use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

use crate::config::{SOCIAL_LOGIN_CONFIG_ENV, SOCIAL_LOGIN_CONFIG_FILE};

use super::errors::ConfigError;
use super::merge::extend_deep;

/// A JSON configuration document addressed with dotted paths.
///
/// Lookups through [`ConfigSource::get`] fail loudly on missing keys, so a
/// misconfigured deployment is reported at startup rather than at the
/// first request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSource {
    root: Value,
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }
}

impl ConfigSource {
    pub fn from_value(root: Value) -> Result<Self, ConfigError> {
        if !root.is_object() {
            return Err(ConfigError::Parse(
                "configuration root must be a JSON object".to_string(),
            ));
        }
        Ok(Self { root })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let root: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(root)
    }

    /// Load the configuration file named by `SOCIAL_LOGIN_CONFIG_FILE` and
    /// apply the inline `SOCIAL_LOGIN_CONFIG` JSON over it.
    pub fn load() -> Result<Self, ConfigError> {
        let inline = std::env::var(SOCIAL_LOGIN_CONFIG_ENV).ok();
        Self::load_from(SOCIAL_LOGIN_CONFIG_FILE.as_str(), inline.as_deref())
    }

    pub(crate) fn load_from(path: &str, inline: Option<&str>) -> Result<Self, ConfigError> {
        let mut source = match Self::from_file(path) {
            Ok(source) => source,
            // Running without a config file is allowed as long as defaults or
            // the inline override provide the settings.
            Err(ConfigError::Read { .. }) if !Path::new(path).exists() => {
                tracing::debug!("No configuration file at {path}, starting from an empty document");
                Self::default()
            }
            Err(e) => return Err(e),
        };

        if let Some(inline) = inline {
            tracing::debug!("Applying inline override from {SOCIAL_LOGIN_CONFIG_ENV}");
            let overlay: Value = serde_json::from_str(inline).map_err(|e| {
                ConfigError::Parse(format!("{SOCIAL_LOGIN_CONFIG_ENV}: {e}"))
            })?;
            source.merge(overlay)?;
        }

        Ok(source)
    }

    /// Deep-merge `overlay` over the whole document.
    pub fn merge(&mut self, overlay: Value) -> Result<(), ConfigError> {
        if !overlay.is_object() {
            return Err(ConfigError::Parse(
                "configuration override must be a JSON object".to_string(),
            ));
        }
        let root = std::mem::take(&mut self.root);
        self.root = extend_deep(root, overlay);
        Ok(())
    }

    /// Install `defaults` under `section`; values already present in the
    /// document take precedence over them.
    pub fn set_module_defaults(&mut self, section: &str, defaults: Value) {
        let Value::Object(root) = &mut self.root else {
            return;
        };
        let merged = match root.remove(section) {
            Some(existing) => extend_deep(defaults, existing),
            None => defaults,
        };
        root.insert(section.to_string(), merged);
    }

    pub fn get(&self, path: &str) -> Result<&Value, ConfigError> {
        self.lookup(path)
            .ok_or_else(|| ConfigError::MissingKey(path.to_string()))
    }

    pub fn has(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    pub fn get_str(&self, path: &str) -> Result<&str, ConfigError> {
        self.get(path)?
            .as_str()
            .ok_or_else(|| ConfigError::InvalidValue {
                path: path.to_string(),
                message: "expected a string".to_string(),
            })
    }

    /// Deserialize the value at `path` into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConfigError> {
        serde_json::from_value(self.get(path)?.clone()).map_err(|e| ConfigError::InvalidValue {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    // A JSON null is treated as undefined.
    fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))
            .filter(|value| !value.is_null())
    }
}
