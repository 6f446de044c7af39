//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - REST API endpoint and request timeout
//! - Theme (dark mode)
//! - Notification preferences and class reminder offsets
//! - Where the auth token is kept
//!
//! Configuration is stored at `~/.config/timely-tales/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};

/// REST API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Minutes before class start at which reminders fire.
    #[serde(default = "default_class_reminder_offsets")]
    pub class_reminder_offsets_min: Vec<i64>,
    /// Window (hours) in which an open task counts as due soon.
    #[serde(default = "default_due_soon_hours")]
    pub due_soon_hours: i64,
    /// Delay before the due-soon reminder is delivered.
    #[serde(default = "default_due_soon_delay_secs")]
    pub due_soon_delay_secs: i64,
}

/// Local storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Keep the auth token in the OS keyring instead of the data file.
    #[serde(default = "default_true")]
    pub token_in_keyring: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timely-tales/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// One week.
const MAX_REMINDER_OFFSET_MIN: i64 = 7 * 24 * 60;
/// One leap year.
const MAX_DUE_SOON_HOURS: i64 = 366 * 24;
/// One day.
const MAX_DUE_SOON_DELAY_SECS: i64 = 24 * 60 * 60;

// Default functions
fn default_base_url() -> String {
    "http://127.0.0.1:5000/api".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_class_reminder_offsets() -> Vec<i64> {
    vec![60, 30, 20]
}
fn default_due_soon_hours() -> i64 {
    24
}
fn default_due_soon_delay_secs() -> i64 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { dark_mode: false }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            class_reminder_offsets_min: default_class_reminder_offsets(),
            due_soon_hours: default_due_soon_hours(),
            due_soon_delay_secs: default_due_soon_delay_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_in_keyring: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            notifications: NotificationsConfig::default(),
            storage: StorageConfig::default(),
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<i64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
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

    /// Set a config value by key in memory. Returns error if key is unknown
    /// or the value does not fit the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| {
            ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.api.base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "api.base_url".into(),
                message: format!("'{}' is not an absolute URL", self.api.base_url),
            });
        }
        let notifications = &self.notifications;
        if notifications
            .class_reminder_offsets_min
            .iter()
            .any(|m| !(1..=MAX_REMINDER_OFFSET_MIN).contains(m))
        {
            return Err(ConfigError::InvalidValue {
                key: "notifications.class_reminder_offsets_min".into(),
                message: format!("offsets must be between 1 and {MAX_REMINDER_OFFSET_MIN} minutes"),
            });
        }
        if !(1..=MAX_DUE_SOON_HOURS).contains(&notifications.due_soon_hours) {
            return Err(ConfigError::InvalidValue {
                key: "notifications.due_soon_hours".into(),
                message: format!("must be between 1 and {MAX_DUE_SOON_HOURS}"),
            });
        }
        if !(0..=MAX_DUE_SOON_DELAY_SECS).contains(&notifications.due_soon_delay_secs) {
            return Err(ConfigError::InvalidValue {
                key: "notifications.due_soon_delay_secs".into(),
                message: format!("must be between 0 and {MAX_DUE_SOON_DELAY_SECS}"),
            });
        }
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
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
        assert!(!parsed.ui.dark_mode);
        assert_eq!(parsed.notifications.class_reminder_offsets_min, vec![60, 30, 20]);
        assert_eq!(parsed.api.base_url, "http://127.0.0.1:5000/api");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[ui]\ndark_mode = true\n").unwrap();
        assert!(parsed.ui.dark_mode);
        assert_eq!(parsed.notifications.due_soon_hours, 24);
        assert!(parsed.storage.token_in_keyring);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ui.dark_mode").as_deref(), Some("false"));
        assert_eq!(cfg.get("api.timeout_secs").as_deref(), Some("30"));
        assert!(cfg.get("ui.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("ui.dark_mode", "true").unwrap();
        cfg.set("api.base_url", "https://diary.example.com/api").unwrap();
        cfg.set("notifications.class_reminder_offsets_min", "[45, 15]")
            .unwrap();
        assert!(cfg.ui.dark_mode);
        assert_eq!(cfg.api.base_url, "https://diary.example.com/api");
        assert_eq!(cfg.notifications.class_reminder_offsets_min, vec![45, 15]);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.set("ui.nonexistent_key", "value").is_err());
        assert!(cfg.set("nope", "value").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("ui.dark_mode", "not_a_bool").is_err());
        assert!(cfg.set("api.timeout_secs", "soon").is_err());
        assert!(!cfg.ui.dark_mode);
    }

    #[test]
    fn set_rejects_values_failing_validation() {
        let mut cfg = Config::default();
        assert!(cfg.set("api.base_url", "not a url").is_err());
        assert!(cfg
            .set("notifications.class_reminder_offsets_min", "[60, 0]")
            .is_err());
        assert!(cfg
            .set("notifications.class_reminder_offsets_min", "[9000000000000000]")
            .is_err());
        assert!(cfg
            .set("notifications.class_reminder_offsets_min", "[10081]")
            .is_err());
        assert!(cfg
            .set("notifications.due_soon_hours", "9000000000000000")
            .is_err());
        assert!(cfg.set("notifications.due_soon_hours", "0").is_err());
        assert!(cfg
            .set("notifications.due_soon_delay_secs", "-86400")
            .is_err());
        assert!(cfg
            .set("notifications.due_soon_delay_secs", "9000000000000000")
            .is_err());
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:5000/api");
        assert_eq!(cfg.notifications.due_soon_hours, 24);
        assert_eq!(cfg.notifications.due_soon_delay_secs, 5);

        cfg.set("notifications.due_soon_hours", "168").unwrap();
        cfg.set("notifications.due_soon_delay_secs", "0").unwrap();
        cfg.set("notifications.class_reminder_offsets_min", "[10080]")
            .unwrap();
    }

    #[test]
    fn load_from_rejects_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[notifications]\ndue_soon_hours = 9000000000000000\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.api.timeout_secs, 30);
    }

    #[test]
    fn save_and_reload_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("ui.dark_mode", "true").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert!(reloaded.ui.dark_mode);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "ui = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
