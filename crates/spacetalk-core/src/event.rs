//! Key events as seen by the dispatcher.
//!
//! Hosts translate whatever their input source produces into these so the
//! dispatcher never has to know about a particular windowing library.

/// Direction of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Pressed,
    Released,
}

/// The element a key event originated in.
///
/// Stored as a lowercase tag name (`input`, `textarea`, `div`, ...). Sources
/// without any focus information report no tag at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    tag: Option<String>,
}

impl EventTarget {
    /// Target identified by its element tag.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into().to_ascii_lowercase()),
        }
    }

    /// Target of an event whose source has no notion of a focused element.
    pub fn none() -> Self {
        Self { tag: None }
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Whether this target is one of the given tags, ignoring case.
    pub fn is_any_of<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        match &self.tag {
            Some(tag) => tags.iter().any(|t| t.as_ref().eq_ignore_ascii_case(tag)),
            None => false,
        }
    }
}

/// A single key press or release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    kind: KeyEventKind,
    code: String,
    target: EventTarget,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(kind: KeyEventKind, code: impl Into<String>, target: EventTarget) -> Self {
        Self {
            kind,
            code: code.into(),
            target,
            default_prevented: false,
        }
    }

    pub fn pressed(code: impl Into<String>) -> Self {
        Self::new(KeyEventKind::Pressed, code, EventTarget::none())
    }

    pub fn released(code: impl Into<String>) -> Self {
        Self::new(KeyEventKind::Released, code, EventTarget::none())
    }

    /// Replace the target of this event.
    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    pub fn kind(&self) -> KeyEventKind {
        self.kind
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn target(&self) -> &EventTarget {
        &self.target
    }

    /// Whether the key code names the given key, ignoring case.
    pub fn is_key(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
    }

    /// Ask the host to skip its default handling of this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_tag_is_lowercased() {
        let target = EventTarget::tag("TEXTAREA");
        assert_eq!(target.tag_name(), Some("textarea"));
        assert!(target.is_any_of(&["input", "textarea"]));
    }

    #[test]
    fn test_missing_target_matches_nothing() {
        assert!(!EventTarget::none().is_any_of(&["input", "textarea"]));
        assert!(!EventTarget::tag("div").is_any_of(&["input", "textarea"]));
    }

    #[test]
    fn test_prevent_default() {
        let mut event = KeyEvent::pressed("Space");
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
        assert!(event.is_key("space"));
    }
}
