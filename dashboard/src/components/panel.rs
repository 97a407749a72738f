use leptos::*;

/// Titled group of slots
#[component]
pub fn Panel(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <section class="panel">
            <h2>{title}</h2>
            <div class="panel-body">{children()}</div>
        </section>
    }
}
