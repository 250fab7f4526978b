//! Record and stop controls backed by the event loop.
//!
//! Both controls share one recording flag, the same way a record button
//! disables itself and enables the stop button the moment it is clicked.
//! Activation flips the flag right away and then tells the event loop, so a
//! release that arrives before the loop catches up still finds the stop
//! control enabled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use spacetalk_core::{Config, Control, ControlRegistry, ControlRole};
use tao::event_loop::EventLoopProxy;
use tracing::warn;

use crate::event::SpacetalkEvent;
use crate::icon::MicState;

/// Where a control reports its activation.
pub trait ActivationSink {
    fn send(&self, role: ControlRole);
}

impl ActivationSink for EventLoopProxy<SpacetalkEvent> {
    fn send(&self, role: ControlRole) {
        if let Err(e) = self.send_event(SpacetalkEvent::ControlActivated(role)) {
            warn!(%role, "Failed to post control activation: {}", e);
        }
    }
}

/// Shared "is a recording running" flag.
#[derive(Debug, Clone, Default)]
pub struct RecordingFlag(Arc<AtomicBool>);

impl RecordingFlag {
    pub fn is_recording(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, recording: bool) {
        self.0.store(recording, Ordering::SeqCst);
    }

    pub fn mic_state(&self) -> MicState {
        if self.is_recording() {
            MicState::Recording
        } else {
            MicState::Idle
        }
    }
}

/// A control whose activation is forwarded to an [`ActivationSink`].
pub struct ProxyControl<S> {
    role: ControlRole,
    recording: RecordingFlag,
    sink: S,
}

impl<S: ActivationSink> ProxyControl<S> {
    pub fn new(role: ControlRole, recording: RecordingFlag, sink: S) -> Self {
        Self {
            role,
            recording,
            sink,
        }
    }
}

impl<S: ActivationSink> Control for ProxyControl<S> {
    /// Record is usable while idle, stop while recording.
    fn is_enabled(&self) -> bool {
        match self.role {
            ControlRole::Record => !self.recording.is_recording(),
            ControlRole::Stop => self.recording.is_recording(),
        }
    }

    fn activate(&mut self) {
        self.recording.set(self.role == ControlRole::Record);
        self.sink.send(self.role);
    }
}

/// Build the registry holding both controls under their configured markers.
pub fn proxy_controls<S>(
    config: &Config,
    recording: RecordingFlag,
    sink: S,
) -> ControlRegistry<ProxyControl<S>>
where
    S: ActivationSink + Clone,
{
    let mut registry = ControlRegistry::new();
    registry.register(
        config.record_control(),
        ProxyControl::new(ControlRole::Record, recording.clone(), sink.clone()),
    );
    registry.register(
        config.stop_control(),
        ProxyControl::new(ControlRole::Stop, recording, sink),
    );
    registry
}

/// Activate a control the way a click would: only if it exists and is
/// enabled. Returns whether anything was activated.
pub fn click<C: Control>(registry: &mut ControlRegistry<C>, marker: &str) -> bool {
    match registry.get_mut(marker) {
        Some(control) if control.is_enabled() => {
            control.activate();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Sender};

    use spacetalk_core::{Dispatch, KeyDispatcher, KeyEvent};

    use super::*;

    impl ActivationSink for Sender<ControlRole> {
        fn send(&self, role: ControlRole) {
            Sender::send(self, role).ok();
        }
    }

    fn setup() -> (
        ControlRegistry<ProxyControl<Sender<ControlRole>>>,
        RecordingFlag,
        mpsc::Receiver<ControlRole>,
    ) {
        let (sender, receiver) = mpsc::channel();
        let recording = RecordingFlag::default();
        let registry = proxy_controls(&Config::default(), recording.clone(), sender);
        (registry, recording, receiver)
    }

    #[test]
    fn test_enabled_follows_recording_flag() {
        let (registry, recording, _receiver) = setup();
        let record = registry.get("record-button").unwrap();
        let stop = registry.get("stop-button").unwrap();

        assert!(record.is_enabled());
        assert!(!stop.is_enabled());

        recording.set(true);
        assert!(!record.is_enabled());
        assert!(stop.is_enabled());
        assert_eq!(recording.mic_state(), MicState::Recording);
    }

    #[test]
    fn test_click_respects_enabled() {
        let (mut registry, recording, receiver) = setup();

        assert!(!click(&mut registry, "stop-button"));
        assert!(receiver.try_recv().is_err());

        assert!(click(&mut registry, "record-button"));
        assert!(recording.is_recording());
        assert_eq!(receiver.try_recv(), Ok(ControlRole::Record));

        // Second click on record does nothing while recording
        assert!(!click(&mut registry, "record-button"));
        assert!(click(&mut registry, "stop-button"));
        assert!(!recording.is_recording());
        assert_eq!(receiver.try_recv(), Ok(ControlRole::Stop));
        assert!(receiver.try_recv().is_err());

        assert!(!click(&mut registry, "missing"));
    }

    #[test]
    fn test_fast_tap_through_dispatcher() {
        let (mut registry, recording, receiver) = setup();
        let mut dispatcher = KeyDispatcher::default();

        // Press and release before anything drains the sink
        assert_eq!(
            dispatcher.handle(&mut KeyEvent::pressed("Space"), &mut registry),
            Dispatch::Armed { activated: true }
        );
        assert_eq!(
            dispatcher.handle(&mut KeyEvent::released("Space"), &mut registry),
            Dispatch::Released { activated: true }
        );

        assert!(!recording.is_recording());
        let roles: Vec<_> = receiver.try_iter().collect();
        assert_eq!(roles, vec![ControlRole::Record, ControlRole::Stop]);
    }

    #[test]
    fn test_record_disabled_by_click_still_arms() {
        let (mut registry, _recording, receiver) = setup();
        let mut dispatcher = KeyDispatcher::default();

        // Recording started from the tray before the key went down
        click(&mut registry, "record-button");
        receiver.try_recv().unwrap();

        assert_eq!(
            dispatcher.handle(&mut KeyEvent::pressed("Space"), &mut registry),
            Dispatch::Armed { activated: false }
        );
        // The release stops the tray-started recording
        assert_eq!(
            dispatcher.handle(&mut KeyEvent::released("Space"), &mut registry),
            Dispatch::Released { activated: true }
        );
        assert_eq!(receiver.try_recv(), Ok(ControlRole::Stop));
    }
}
