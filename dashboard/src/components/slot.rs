//! Slot Component
//!
//! One captioned value, written from the current [`DisplayView`].
//!
//! [`DisplayView`]: crate::state::DisplayView

use leptos::*;

use crate::state::{DashboardState, SlotId};

#[component]
pub fn SlotValue(kind: SlotId) -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let text = move || state.view.with(|view| view.text(kind).to_string());

    view! {
        <div class="slot">
            <span class="slot-caption">{kind.caption()}</span>
            <span class="slot-value" id=kind.id()>{text}</span>
        </div>
    }
}
