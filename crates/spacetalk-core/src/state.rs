//! Dispatcher state types.

/// Whether a trigger press is waiting for its matching release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchState {
    /// No press outstanding
    #[default]
    Idle,
    /// The trigger key went down and has not come back up yet
    Armed,
}

impl DispatchState {
    pub fn is_armed(&self) -> bool {
        matches!(self, DispatchState::Armed)
    }
}
