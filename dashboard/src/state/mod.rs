//! State Management
//!
//! The snapshot model, its projection into slot text, and the WebSocket
//! connection that feeds them.

pub mod coerce;
pub mod snapshot;
pub mod view;
pub mod websocket;

use leptos::*;

pub use snapshot::Snapshot;
pub use view::{DisplayView, SlotId};
pub use websocket::ConnectionStatus;

/// Reactive state shared by every component
#[derive(Clone, Copy)]
pub struct DashboardState {
    /// Text of every slot, replaced as a whole on each update
    pub view: RwSignal<DisplayView>,
    pub connection: RwSignal<ConnectionStatus>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            view: create_rw_signal(DisplayView::placeholder()),
            connection: create_rw_signal(ConnectionStatus::Connecting),
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the state and provide it as context
pub fn provide_dashboard_state() -> DashboardState {
    let state = DashboardState::new();
    provide_context(state);
    state
}
