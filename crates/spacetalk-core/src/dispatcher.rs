//! Turns presses and releases of a trigger key into activations of a record
//! control and a stop control.
//!
//! Holding a key makes the platform repeat press events many times a second.
//! The dispatcher only lets the first press through and waits for the
//! release before another press counts again. Key events typed into
//! text-entry elements never trigger anything.

use tracing::{debug, info};

use crate::config::{ArmPolicy, Config};
use crate::control::{ControlRole, ControlSurface};
use crate::event::{KeyEvent, KeyEventKind};
use crate::state::DispatchState;

/// What a single call to [`KeyDispatcher::handle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The event came from a text-entry element and was left alone.
    Ignored,
    /// Wrong key, wrong direction or wrong state. Nothing happened.
    Unmatched,
    /// The trigger went down and the dispatcher is now armed.
    Armed { activated: bool },
    /// The trigger came back up and the dispatcher is idle again.
    Released { activated: bool },
}

impl Dispatch {
    /// Whether a control was activated while handling the event.
    pub fn activated(&self) -> bool {
        matches!(
            self,
            Dispatch::Armed { activated: true } | Dispatch::Released { activated: true }
        )
    }
}

/// Settings the dispatcher is built from. Usually taken from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherSettings {
    pub trigger_key: String,
    pub record_control: String,
    pub stop_control: String,
    pub exempt_targets: Vec<String>,
    pub arm_policy: ArmPolicy,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for DispatcherSettings {
    fn from(config: &Config) -> Self {
        Self {
            trigger_key: config.trigger_key().to_string(),
            record_control: config.record_control().to_string(),
            stop_control: config.stop_control().to_string(),
            exempt_targets: config.exempt_targets().to_vec(),
            arm_policy: config.arm_policy(),
        }
    }
}

/// Key-triggered control dispatcher.
///
/// Each instance owns its state, so several dispatchers can run side by side
/// without seeing each other's presses.
#[derive(Debug, Clone)]
pub struct KeyDispatcher {
    settings: DispatcherSettings,
    state: DispatchState,
}

impl Default for KeyDispatcher {
    fn default() -> Self {
        Self::new(DispatcherSettings::default())
    }
}

impl KeyDispatcher {
    pub fn new(settings: DispatcherSettings) -> Self {
        Self {
            settings,
            state: DispatchState::Idle,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(DispatcherSettings::from(config))
    }

    pub fn settings(&self) -> &DispatcherSettings {
        &self.settings
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state.is_armed()
    }

    /// Drop back to idle without touching any control.
    ///
    /// Hosts call this when they stop receiving key events (focus loss), since
    /// the release that would have disarmed the dispatcher may never arrive.
    pub fn reset(&mut self) {
        if self.state.is_armed() {
            debug!("dispatcher reset while armed");
        }
        self.state = DispatchState::Idle;
    }

    /// Handle one key event, activating controls on `surface` as needed.
    pub fn handle<S>(&mut self, event: &mut KeyEvent, surface: &mut S) -> Dispatch
    where
        S: ControlSurface + ?Sized,
    {
        if event.target().is_any_of(self.settings.exempt_targets.as_slice()) {
            debug!(tag = ?event.target().tag_name(), "ignoring key event from text entry");
            return Dispatch::Ignored;
        }

        if !event.is_key(&self.settings.trigger_key) {
            return Dispatch::Unmatched;
        }

        match (event.kind(), self.state) {
            (KeyEventKind::Pressed, DispatchState::Idle) => {
                let activated = self.activate(ControlRole::Record, surface);
                if !activated && self.settings.arm_policy == ArmPolicy::OnActivation {
                    debug!("record control unavailable, staying idle");
                    return Dispatch::Unmatched;
                }
                event.prevent_default();
                self.state = DispatchState::Armed;
                info!(activated, "trigger pressed");
                Dispatch::Armed { activated }
            }
            (KeyEventKind::Released, DispatchState::Armed) => {
                event.prevent_default();
                self.state = DispatchState::Idle;
                let activated = self.activate(ControlRole::Stop, surface);
                info!(activated, "trigger released");
                Dispatch::Released { activated }
            }
            _ => Dispatch::Unmatched,
        }
    }

    fn activate<S>(&self, role: ControlRole, surface: &mut S) -> bool
    where
        S: ControlSurface + ?Sized,
    {
        let marker = match role {
            ControlRole::Record => &self.settings.record_control,
            ControlRole::Stop => &self.settings.stop_control,
        };
        match surface.resolve(marker) {
            Some(control) if control.is_enabled() => {
                control.activate();
                true
            }
            Some(_) => {
                debug!(%role, marker = marker.as_str(), "control disabled");
                false
            }
            None => {
                debug!(%role, marker = marker.as_str(), "control not found");
                false
            }
        }
    }
}
