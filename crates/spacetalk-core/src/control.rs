//! Controls the dispatcher activates and the surfaces it finds them on.

use std::collections::HashMap;
use std::fmt;

/// Something the dispatcher can press on the user's behalf.
pub trait Control {
    /// Disabled controls are skipped silently.
    fn is_enabled(&self) -> bool;

    /// Simulate a user activation (a click).
    fn activate(&mut self);
}

impl<T: Control + ?Sized> Control for Box<T> {
    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn activate(&mut self) {
        (**self).activate()
    }
}

/// Where controls are looked up by marker.
///
/// The dispatcher resolves a control every time it needs one and never holds
/// on to the reference, so a surface may add, drop or replace controls
/// between events.
pub trait ControlSurface {
    fn resolve(&mut self, marker: &str) -> Option<&mut dyn Control>;
}

/// Which of the two controls an activation was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlRole {
    Record,
    Stop,
}

impl fmt::Display for ControlRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlRole::Record => f.write_str("record"),
            ControlRole::Stop => f.write_str("stop"),
        }
    }
}

/// A [`ControlSurface`] backed by a map from marker to control.
#[derive(Debug)]
pub struct ControlRegistry<C> {
    controls: HashMap<String, C>,
}

impl<C> Default for ControlRegistry<C> {
    fn default() -> Self {
        Self {
            controls: HashMap::new(),
        }
    }
}

impl<C: Control> ControlRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control under a marker, returning whatever it replaced.
    pub fn register(&mut self, marker: impl Into<String>, control: C) -> Option<C> {
        self.controls.insert(marker.into(), control)
    }

    pub fn remove(&mut self, marker: &str) -> Option<C> {
        self.controls.remove(marker)
    }

    pub fn get(&self, marker: &str) -> Option<&C> {
        self.controls.get(marker)
    }

    pub fn get_mut(&mut self, marker: &str) -> Option<&mut C> {
        self.controls.get_mut(marker)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl<C: Control> ControlSurface for ControlRegistry<C> {
    fn resolve(&mut self, marker: &str) -> Option<&mut dyn Control> {
        self.controls
            .get_mut(marker)
            .map(|control| control as &mut dyn Control)
    }
}
