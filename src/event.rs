//! Application events for the tao event loop.

use spacetalk_core::ControlRole;

/// Events posted to the tao event loop from outside the key handler.
#[derive(Debug, Clone)]
pub enum SpacetalkEvent {
    /// The record or stop control was activated
    ControlActivated(ControlRole),
}
