//! TOML-based application configuration.
//!
//! Stores the session duration, urgency threshold, tick period, dial
//! geometry, color tokens and alarm preference.
//!
//! Configuration is stored at `~/.config/ringdown/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::timer::{DEFAULT_DIAL_RADIUS, DEFAULT_URGENT_THRESHOLD_SECS};

/// Session-duration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_total_secs")]
    pub total_secs: u32,
    #[serde(default = "default_urgent_threshold")]
    pub urgent_threshold_secs: u32,
    /// Tick period in milliseconds. One tick is one logical second.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

/// Circular-indicator geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialConfig {
    #[serde(default = "default_radius")]
    pub radius: f64,
}

/// Color tokens the normal/urgent treatments map to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

/// Notification sound configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/ringdown/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub dial: DialConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub alarm: AlarmConfig,
}

// Default functions
fn default_total_secs() -> u32 {
    600
}
fn default_urgent_threshold() -> u32 {
    DEFAULT_URGENT_THRESHOLD_SECS
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_radius() -> f64 {
    DEFAULT_DIAL_RADIUS
}
fn default_primary_color() -> String {
    "#6366f1".into()
}
fn default_accent_color() -> String {
    "#f43f5e".into()
}
fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_secs: default_total_secs(),
            urgent_threshold_secs: default_urgent_threshold(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            accent_color: default_accent_color(),
        }
    }
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            dial: DialConfig::default(),
            ui: UiConfig::default(),
            alarm: AlarmConfig::default(),
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
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let invalid = |message: String| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message,
                };
                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    invalid(format!("cannot parse '{value}' as number"))
                                })?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
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

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Reject values the timer cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.total_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "session.total_secs".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.session.tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "session.tick_ms".into(),
                message: "must be at least 1".into(),
            });
        }
        if !self.dial.radius.is_finite() || self.dial.radius <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "dial.radius".into(),
                message: "must be finite and positive".into(),
            });
        }
        Ok(())
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
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

    /// Set a config value by key, validate, and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// the resulting config is invalid, or it cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session.total_secs, 600);
        assert_eq!(parsed.session.urgent_threshold_secs, 60);
        assert_eq!(parsed.session.tick_ms, 1000);
        assert_eq!(parsed.dial.radius, 140.0);
        assert!(parsed.alarm.enabled);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("session.total_secs").as_deref(), Some("600"));
        assert_eq!(cfg.get("ui.primary_color").as_deref(), Some("#6366f1"));
        assert!(cfg.get("session.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "session.total_secs", "300").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "session.total_secs").unwrap(),
            &serde_json::Value::Number(300.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "alarm.enabled", "false").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "alarm.enabled").unwrap(),
            &serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "session.nonexistent", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "alarm.enabled", "not_a_bool");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn validate_rejects_zero_duration() {
        let mut cfg = Config::default();
        cfg.session.total_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.session.tick_ms = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.dial.radius = -1.0;
        assert!(cfg.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }
}
