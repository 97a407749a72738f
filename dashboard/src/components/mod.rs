//! UI Components
//!
//! Building blocks for the dashboard page.

pub mod connection_badge;
pub mod panel;
pub mod slot;

pub use connection_badge::ConnectionBadge;
pub use panel::Panel;
pub use slot::SlotValue;
