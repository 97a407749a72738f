//! Dashboard Page
//!
//! Latest detection, cumulative counts and subsystem health.

use leptos::*;

use crate::components::{Panel, SlotValue};
use crate::state::SlotId;

#[component]
pub fn Dashboard() -> impl IntoView {
    view! {
        <div class="panels">
            <Panel title="Latest detection">
                <SlotValue kind=SlotId::Label />
                <SlotValue kind=SlotId::Recyclable />
                <SlotValue kind=SlotId::Confidence />
                <SlotValue kind=SlotId::Location />
            </Panel>

            <Panel title="Counts">
                <SlotValue kind=SlotId::Total />
                <SlotValue kind=SlotId::CountRec />
                <SlotValue kind=SlotId::CountTrash />
                <SlotValue kind=SlotId::Errors />
            </Panel>

            <Panel title="Subsystems">
                <SlotValue kind=SlotId::Vision />
                <SlotValue kind=SlotId::Arm />
                <SlotValue kind=SlotId::LastUpdate />
            </Panel>
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    use crate::state::{provide_dashboard_state, DashboardState, DisplayView};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_dashboard() -> DashboardState {
        let document = document();
        let root = document
            .create_element("div")
            .unwrap()
            .unchecked_into::<web_sys::HtmlElement>();
        document.body().unwrap().append_child(&root).unwrap();

        let state = Rc::new(Cell::new(None));
        let state_in = Rc::clone(&state);
        mount_to(root, move || {
            state_in.set(Some(provide_dashboard_state()));
            view! { <Dashboard /> }
        });
        state.get().unwrap()
    }

    fn slot_text(slot: SlotId) -> String {
        document()
            .get_element_by_id(slot.id())
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn test_every_slot_starts_at_placeholder() {
        mount_dashboard();

        let placeholder = DisplayView::placeholder();
        for slot in SlotId::ALL {
            assert_eq!(slot_text(slot), placeholder.text(slot), "slot {}", slot.id());
        }
    }

    #[wasm_bindgen_test]
    fn test_view_update_repaints_slots() {
        let state = mount_dashboard();

        state.view.set(DisplayView {
            label: "can".to_string(),
            total: "7".to_string(),
            ..DisplayView::placeholder()
        });

        assert_eq!(slot_text(SlotId::Label), "can");
        assert_eq!(slot_text(SlotId::Total), "7");
    }
}
