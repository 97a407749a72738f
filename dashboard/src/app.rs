//! App Root Component

use leptos::*;

use crate::components::ConnectionBadge;
use crate::pages::Dashboard;
use crate::state::{provide_dashboard_state, websocket};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_dashboard_state();

    // One connection for the lifetime of the page
    websocket::connect(state);

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"TrashBot"</h1>
            </header>

            <main>
                <Dashboard />
            </main>

            <footer class="app-footer">
                <span>"Connection: "</span>
                <ConnectionBadge />
            </footer>
        </div>
    }
}
