//! Core types and configuration for spacetalk.
//!
//! This crate holds the key dispatcher and the abstractions it talks to. It
//! does not depend on any windowing or tray library so hosts can feed it
//! events from wherever they come from.

mod config;
mod control;
mod dispatcher;
mod event;
mod state;

pub use config::{ArmPolicy, Config, ConfigError, ConfigManager};
pub use control::{Control, ControlRegistry, ControlRole, ControlSurface};
pub use dispatcher::{Dispatch, DispatcherSettings, KeyDispatcher};
pub use event::{EventTarget, KeyEvent, KeyEventKind};
pub use state::DispatchState;

/// Application name
pub const APP_NAME: &str = "spacetalk";

/// Pretty application name for display
pub const APP_NAME_PRETTY: &str = "Spacetalk";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Key code of the default trigger key
pub const DEFAULT_TRIGGER_KEY: &str = "Space";
