//! TOML-based application configuration.
//!
//! Stores the demo login credentials and the motivation service
//! endpoint. Configuration lives at `~/.config/habbitly/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

use super::data_dir;

/// Demo login credentials.
///
/// This is a single-user demo application; the credentials ship in
/// plaintext config exactly like the seed data they replace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
}

/// Motivation text-generation service settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotivationConfig {
    /// Full URL of the generation endpoint. Unset disables the client.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Optional bearer token sent with each request.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habbitly/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub motivation: MotivationConfig,
}

fn default_username() -> String {
    "admin".to_string()
}
fn default_password() -> String {
    "123456".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            motivation: MotivationConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                if !obj.contains_key(part) {
                    return Err(ConfigError::UnknownKey(key.to_string()));
                }

                let existing = &obj[part];
                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<i64>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    // Optional string fields deserialize from plain strings.
                    _ => serde_json::Value::String(value.to_string()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/habbitly"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the default config on first run.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist it.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.auth.username, "admin");
        assert_eq!(parsed.auth.password, "123456");
        assert!(parsed.motivation.endpoint.is_none());
    }

    #[test]
    fn empty_toml_fills_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.auth.username, "admin");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("auth.username").as_deref(), Some("admin"));
        assert!(cfg.get("auth.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_string() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "auth.username", "demo").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "auth.username").unwrap(),
            &serde_json::Value::String("demo".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_sets_optional_endpoint() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "motivation.endpoint", "http://localhost:9001")
            .unwrap();
        let parsed: Config = serde_json::from_value(json).unwrap();
        assert_eq!(
            parsed.motivation.endpoint.as_deref(),
            Some("http://localhost:9001")
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(Config::set_json_value_by_path(&mut json, "auth.nonexistent", "x").is_err());
        assert!(Config::set_json_value_by_path(&mut json, "nonsense", "x").is_err());
    }
}
