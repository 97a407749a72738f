//! Connection Badge
//!
//! Shows the socket lifecycle in the `conn` element.

use leptos::*;

use crate::state::{ConnectionStatus, DashboardState};

/// DOM id of the connection label
pub const CONN_ID: &str = "conn";

#[component]
pub fn ConnectionBadge() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    let class = move || match state.connection.get() {
        ConnectionStatus::Connecting => "conn conn-connecting",
        ConnectionStatus::Live => "conn conn-live",
        ConnectionStatus::Disconnected => "conn conn-disconnected",
        ConnectionStatus::Error => "conn conn-error",
    };

    view! {
        <span class=class id=CONN_ID>
            {move || state.connection.get().label()}
        </span>
    }
}
