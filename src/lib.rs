// Re-export from the core crate
pub use spacetalk_core::{
    APP_NAME, APP_NAME_PRETTY, ArmPolicy, Config, ConfigManager, Control, ControlRegistry,
    ControlRole, ControlSurface, DEFAULT_LOG_LEVEL, Dispatch, DispatchState, DispatcherSettings,
    KeyDispatcher, KeyEvent, KeyEventKind,
};

// App-specific modules
pub mod config_ext;
pub mod controls;
pub mod event;
pub mod icon;
pub mod input;
pub mod notify;

// Version from this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
