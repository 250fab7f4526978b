//! Configuration management for spacetalk.
//!
//! This module provides core configuration that doesn't depend on
//! platform-specific UI libraries.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{APP_NAME, DEFAULT_TRIGGER_KEY};

/// When a trigger press moves the dispatcher into the armed state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmPolicy {
    /// Arm on every trigger press, even if the record control was missing or
    /// disabled.
    #[default]
    Always,
    /// Arm only when the record control was actually activated.
    OnActivation,
}

/// Problems found by [`Config::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("trigger key must not be empty")]
    EmptyTriggerKey,
    #[error("trigger key {0:?} must be a single key without modifiers")]
    CompoundTriggerKey(String),
    #[error("{0} control marker must not be empty")]
    EmptyMarker(&'static str),
    #[error("record and stop controls share the marker {0:?}")]
    SharedMarker(String),
    #[error("exempt target list contains an empty entry")]
    EmptyExemptTarget,
}

/// Core configuration structure for the application.
///
/// Platform-specific settings like hotkeys are parsed by the main
/// application from the strings kept here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Key code of the trigger key, e.g. "Space" or "F13"
    #[serde(
        default = "default_trigger_key",
        skip_serializing_if = "is_default_trigger_key"
    )]
    pub trigger_key: String,

    /// Marker the record control is registered under
    #[serde(
        default = "default_record_control",
        skip_serializing_if = "is_default_record_control"
    )]
    pub record_control: String,

    /// Marker the stop control is registered under
    #[serde(
        default = "default_stop_control",
        skip_serializing_if = "is_default_stop_control"
    )]
    pub stop_control: String,

    /// Element tags whose key events are never treated as shortcuts
    #[serde(
        default = "default_exempt_targets",
        skip_serializing_if = "is_default_exempt_targets"
    )]
    pub exempt_targets: Vec<String>,

    /// Whether a press arms the dispatcher when the record control could not
    /// be activated
    #[serde(default, skip_serializing_if = "is_default_arm_policy")]
    pub arm_policy: ArmPolicy,

    /// Also register the trigger key as a system-wide hotkey
    #[serde(default, skip_serializing_if = "is_false")]
    pub global_hotkey: bool,

    /// Show desktop notifications for warnings and errors
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub notifications: bool,
}

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn default_trigger_key() -> String {
    DEFAULT_TRIGGER_KEY.to_string()
}

fn is_default_trigger_key(v: &str) -> bool {
    v == DEFAULT_TRIGGER_KEY
}

fn default_record_control() -> String {
    "record-button".to_string()
}

fn is_default_record_control(v: &str) -> bool {
    v == "record-button"
}

fn default_stop_control() -> String {
    "stop-button".to_string()
}

fn is_default_stop_control(v: &str) -> bool {
    v == "stop-button"
}

fn default_exempt_targets() -> Vec<String> {
    vec!["input".to_string(), "textarea".to_string()]
}

fn is_default_exempt_targets(v: &[String]) -> bool {
    v == default_exempt_targets().as_slice()
}

fn is_default_arm_policy(v: &ArmPolicy) -> bool {
    *v == ArmPolicy::default()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trigger_key: default_trigger_key(),
            record_control: default_record_control(),
            stop_control: default_stop_control(),
            exempt_targets: default_exempt_targets(),
            arm_policy: ArmPolicy::default(),
            global_hotkey: false,
            notifications: true,
        }
    }
}

impl Config {
    /// Get the trigger key code
    pub fn trigger_key(&self) -> &str {
        &self.trigger_key
    }

    /// Get the record control marker
    pub fn record_control(&self) -> &str {
        &self.record_control
    }

    /// Get the stop control marker
    pub fn stop_control(&self) -> &str {
        &self.stop_control
    }

    /// Get the exempt element tags
    pub fn exempt_targets(&self) -> &[String] {
        &self.exempt_targets
    }

    pub fn arm_policy(&self) -> ArmPolicy {
        self.arm_policy
    }

    pub fn global_hotkey(&self) -> bool {
        self.global_hotkey
    }

    pub fn notifications(&self) -> bool {
        self.notifications
    }

    /// Check the configuration for values the dispatcher can't work with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.trigger_key.trim().is_empty() {
            return Err(ConfigError::EmptyTriggerKey);
        }
        if self
            .trigger_key
            .contains(|c: char| c == '+' || c.is_whitespace())
        {
            return Err(ConfigError::CompoundTriggerKey(self.trigger_key.clone()));
        }
        if self.record_control.trim().is_empty() {
            return Err(ConfigError::EmptyMarker("record"));
        }
        if self.stop_control.trim().is_empty() {
            return Err(ConfigError::EmptyMarker("stop"));
        }
        if self.record_control == self.stop_control {
            return Err(ConfigError::SharedMarker(self.record_control.clone()));
        }
        if self.exempt_targets.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::EmptyExemptTarget);
        }
        Ok(())
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new ConfigManager with the default configuration directory.
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Creates a new ConfigManager with a specified configuration directory.
    pub fn with_config_dir<P: AsRef<std::path::Path>>(dir: P) -> Self {
        let config_path = dir.as_ref().join(format!("{}.toml", APP_NAME));
        Self { config_path }
    }

    /// Returns the default path to the configuration file.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to retrieve configuration directory")?;
        Ok(config_dir.join(APP_NAME).join(format!("{}.toml", APP_NAME)))
    }

    /// Loads the configuration from the config file or returns default.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file at {:?}", self.config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file at {:?}", self.config_path))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file at {:?}", self.config_path))?;

        if config.global_hotkey() && config.trigger_key().eq_ignore_ascii_case("space") {
            warn!(
                "Registering space as a global hotkey swallows it in every application. \
                 Consider a dedicated trigger key."
            );
        }

        Ok(config)
    }

    /// Saves the configuration to the config file.
    pub fn save(&self, config: &Config) -> Result<()> {
        let config_dir = self
            .config_path
            .parent()
            .with_context(|| format!("Failed to get parent directory of {:?}", self.config_path))?;

        fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create config directory at {:?}", config_dir))?;

        let serialized =
            toml::to_string_pretty(&config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, serialized)
            .with_context(|| format!("Failed to write config file at {:?}", self.config_path))?;

        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path(&self) -> &std::path::Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.trigger_key(), "Space");
        assert_eq!(config.record_control(), "record-button");
        assert_eq!(config.stop_control(), "stop-button");
        assert_eq!(config.exempt_targets(), ["input", "textarea"]);
        assert_eq!(config.arm_policy(), ArmPolicy::Always);
        assert!(!config.global_hotkey());
        assert!(config.notifications());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_are_not_serialized() {
        let serialized = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(serialized.trim().is_empty());
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            trigger_key = "F13"
            arm_policy = "on_activation"
            "#,
        )
        .unwrap();

        assert_eq!(config.trigger_key(), "F13");
        assert_eq!(config.arm_policy(), ArmPolicy::OnActivation);
        assert_eq!(config.record_control(), "record-button");
    }

    #[test]
    fn test_validate() {
        let config = Config {
            trigger_key: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyTriggerKey));

        let config = Config {
            trigger_key: "ctrl+F13".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::CompoundTriggerKey("ctrl+F13".to_string()))
        );

        let config = Config {
            stop_control: String::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyMarker("stop")));

        let config = Config {
            stop_control: "record-button".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SharedMarker("record-button".to_string()))
        );

        let config = Config {
            exempt_targets: vec!["input".to_string(), String::new()],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyExemptTarget));
    }

    #[test]
    fn test_config_manager_save_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_dir(temp_dir.path());

        // Missing file falls back to defaults
        assert_eq!(manager.load().unwrap().trigger_key(), "Space");

        let config = Config {
            trigger_key: "F13".to_string(),
            exempt_targets: vec!["input".to_string()],
            ..Default::default()
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(config.trigger_key, loaded.trigger_key);
        assert_eq!(config.exempt_targets, loaded.exempt_targets);
    }

    #[test]
    fn test_config_manager_rejects_invalid_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_dir(temp_dir.path());

        fs::write(manager.config_path(), "record_control = \"\"\n").unwrap();
        assert!(manager.load().is_err());
    }
}
