//! TrashBot Dashboard
//!
//! Browser view of the sorting robot, built with Leptos (WASM). It opens one
//! WebSocket to the page's host and repaints every slot from each state
//! message the server pushes.

use leptos::*;

mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
