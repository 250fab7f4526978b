//! App-specific configuration extensions.
//!
//! This module provides hotkey support on top of the core Config. The
//! trigger is resolved once here and both the global hotkey and the
//! dispatcher are built from the result, so the window and the hotkey always
//! wait for the same key.

use std::str::FromStr;

use global_hotkey::hotkey::{Code, HotKey};
use parking_lot::RwLock;
use tracing::warn;

use crate::{Config, DispatcherSettings};

/// Default hotkey: plain Space, no modifiers
pub fn default_hotkey() -> HotKey {
    HotKey::new(None, Code::Space)
}

/// Dispatcher settings for `config` waiting for the key of `hotkey`.
pub fn settings_for_hotkey(config: &Config, hotkey: &HotKey) -> DispatcherSettings {
    DispatcherSettings {
        trigger_key: format!("{:?}", hotkey.key),
        ..DispatcherSettings::from(config)
    }
}

/// Extension trait for Config to handle hotkeys.
pub trait ConfigExt {
    /// Get the hotkey, parsing from config or using default.
    fn hotkey(&self) -> HotKey;

    /// Key code name of the resolved hotkey, spelled the way window key
    /// events name keys.
    fn trigger_key_name(&self) -> String {
        format!("{:?}", self.hotkey().key)
    }

    /// Dispatcher settings waiting for the resolved trigger key.
    fn dispatcher_settings(&self) -> DispatcherSettings;
}

impl ConfigExt for Config {
    fn hotkey(&self) -> HotKey {
        match HotKey::from_str(self.trigger_key()) {
            Ok(hotkey) if hotkey.mods.is_empty() => hotkey,
            Ok(_) => {
                warn!(
                    trigger_key = self.trigger_key(),
                    "Trigger key has modifiers, falling back to space"
                );
                default_hotkey()
            }
            Err(e) => {
                warn!(
                    trigger_key = self.trigger_key(),
                    "Invalid trigger key, falling back to space: {}", e
                );
                default_hotkey()
            }
        }
    }

    fn dispatcher_settings(&self) -> DispatcherSettings {
        settings_for_hotkey(self, &self.hotkey())
    }
}

impl ConfigExt for RwLock<Config> {
    fn hotkey(&self) -> HotKey {
        self.read().hotkey()
    }

    fn dispatcher_settings(&self) -> DispatcherSettings {
        self.read().dispatcher_settings()
    }
}
