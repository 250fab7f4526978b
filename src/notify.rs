//! System notifications.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use notify_rust::Notification;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber, error};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use crate::{APP_NAME, APP_NAME_PRETTY};

/// Send a system notification with a summary and body.
pub fn notify(summary: &str, body: &str) {
    Notification::new()
        .appname(APP_NAME)
        .summary(&format!("{} - {}", APP_NAME_PRETTY, summary))
        .body(body)
        .show()
        .map_err(|e| error!("Failed to send notification: {}", e))
        .ok();
}

/// Visitor to extract the message field from tracing events.
struct MessageVisitor {
    message: Option<String>,
}

impl MessageVisitor {
    fn new() -> Self {
        Self { message: None }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }
}

/// Tracing layer that sends notifications for warnings and errors.
///
/// Starts enabled. The switch lets the config turn it off once it has been
/// loaded, which happens after logging is already up.
#[derive(Debug, Clone)]
pub struct NotificationLayer {
    enabled: Arc<AtomicBool>,
}

impl Default for NotificationLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationLayer {
    pub fn new() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Handle for turning notifications on or off later.
    pub fn switch(&self) -> Arc<AtomicBool> {
        self.enabled.clone()
    }
}

fn should_notify(level: Level) -> Option<&'static str> {
    match level {
        Level::ERROR => Some("error"),
        Level::WARN => Some("warning"),
        _ => None,
    }
}

impl<S: Subscriber> Layer<S> for NotificationLayer {
    fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
        if !self.enabled.load(Ordering::Relaxed) {
            return;
        }

        let level = *event.metadata().level();

        if let Some(summary) = should_notify(level) {
            let mut visitor = MessageVisitor::new();
            event.record(&mut visitor);

            if let Some(message) = visitor.message {
                notify(summary, &message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_notify() {
        assert_eq!(should_notify(Level::ERROR), Some("error"));
        assert_eq!(should_notify(Level::WARN), Some("warning"));
        assert_eq!(should_notify(Level::INFO), None);
        assert_eq!(should_notify(Level::DEBUG), None);
    }

    #[test]
    fn test_switch_is_shared() {
        let layer = NotificationLayer::new();
        let switch = layer.switch();
        switch.store(false, Ordering::Relaxed);
        assert!(!layer.enabled.load(Ordering::Relaxed));
    }
}
