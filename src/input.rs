//! Translation of platform keyboard events into dispatcher key events.
//!
//! Neither tao window events nor global hotkeys know which element had focus,
//! so every event built here has no target and is never exempt.

use global_hotkey::{GlobalHotKeyEvent, HotKeyState};
use spacetalk_core::{EventTarget, KeyEvent, KeyEventKind};
use tao::event::ElementState;
use tao::keyboard::KeyCode;

/// Build a key event from a keyboard event delivered to our window.
///
/// Repeats are passed through as presses; the dispatcher folds them.
pub fn from_window_key(event: &tao::event::KeyEvent) -> KeyEvent {
    window_key(event.physical_key, event.state)
}

pub fn window_key(code: KeyCode, state: ElementState) -> KeyEvent {
    let kind = match state {
        ElementState::Released => KeyEventKind::Released,
        _ => KeyEventKind::Pressed,
    };
    KeyEvent::new(kind, key_name(code), EventTarget::none())
}

/// Build a key event from a global hotkey event. The hotkey only fires for
/// the trigger, so its code is supplied by the caller.
pub fn from_hotkey(event: &GlobalHotKeyEvent, trigger_key: &str) -> KeyEvent {
    hotkey_key(event.state(), trigger_key)
}

pub fn hotkey_key(state: HotKeyState, trigger_key: &str) -> KeyEvent {
    let kind = match state {
        HotKeyState::Pressed => KeyEventKind::Pressed,
        HotKeyState::Released => KeyEventKind::Released,
    };
    KeyEvent::new(kind, trigger_key, EventTarget::none())
}

/// Name of a physical key in the same spelling the config uses ("Space",
/// "F13", "KeyA").
pub fn key_name(code: KeyCode) -> String {
    format!("{:?}", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_space() {
        let event = window_key(KeyCode::Space, ElementState::Pressed);
        assert_eq!(event.kind(), KeyEventKind::Pressed);
        assert!(event.is_key("Space"));
        assert_eq!(event.target().tag_name(), None);

        let event = window_key(KeyCode::Space, ElementState::Released);
        assert_eq!(event.kind(), KeyEventKind::Released);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(KeyCode::F13), "F13");
        assert_eq!(key_name(KeyCode::KeyA), "KeyA");
    }

    #[test]
    fn test_hotkey_events() {
        let event = hotkey_key(HotKeyState::Pressed, "F13");
        assert_eq!(event.kind(), KeyEventKind::Pressed);
        assert_eq!(event.code(), "F13");

        let event = hotkey_key(HotKeyState::Released, "F13");
        assert_eq!(event.kind(), KeyEventKind::Released);
    }
}
