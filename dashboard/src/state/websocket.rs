//! WebSocket Client
//!
//! Single live connection to the TrashBot server. Every frame that carries a
//! state replaces the rendered view; there is no reconnect and nothing is
//! ever sent back.

use leptos::*;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::coerce::is_truthy;
use super::{DashboardState, DisplayView, Snapshot};

/// Lifecycle of the one socket the page opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Live,
    Disconnected,
    Error,
}

/// Socket lifecycle callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketEvent {
    Open,
    Close,
    Error,
}

impl SocketEvent {
    /// Status shown once this event fires
    pub fn status(self) -> ConnectionStatus {
        match self {
            SocketEvent::Open => ConnectionStatus::Live,
            SocketEvent::Close => ConnectionStatus::Disconnected,
            SocketEvent::Error => ConnectionStatus::Error,
        }
    }
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting…",
            ConnectionStatus::Live => "Live",
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Error => "Error",
        }
    }
}

/// What to do with one inbound text frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Replace the view with this snapshot
    Render(Snapshot),
    /// Valid JSON without a usable `state`
    Ignored,
    /// Not JSON; carries the parse error
    Malformed(String),
}

/// Socket URL for a page served from `host` over `protocol` (`"https:"` etc.)
pub fn socket_url(protocol: &str, host: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{}://{}/ws", scheme, host)
}

/// Socket URL derived from the current page location
pub fn page_socket_url() -> Result<String, JsValue> {
    let location = window().location();
    Ok(socket_url(&location.protocol()?, &location.host()?))
}

pub fn classify_frame(text: &str) -> FrameOutcome {
    let message: Value = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => return FrameOutcome::Malformed(e.to_string()),
    };

    match message.get("state") {
        Some(state) if is_truthy(state) => FrameOutcome::Render(Snapshot::from_value(state)),
        _ => FrameOutcome::Ignored,
    }
}

/// Apply one text frame to the view. A malformed frame leaves the view as
/// it was and returns the parse error for the caller to report.
pub fn apply_frame(state: DashboardState, text: &str) -> Result<(), String> {
    match classify_frame(text) {
        FrameOutcome::Render(snapshot) => {
            state.view.set(DisplayView::project(&snapshot));
            Ok(())
        }
        FrameOutcome::Ignored => Ok(()),
        FrameOutcome::Malformed(err) => Err(err),
    }
}

pub fn apply_event(state: DashboardState, event: SocketEvent) {
    state.connection.set(event.status());
}

/// Open the socket and wire its callbacks into `state`
pub fn connect(state: DashboardState) {
    let ws = match page_socket_url().and_then(|url| WebSocket::new(&url)) {
        Ok(ws) => ws,
        Err(e) => {
            web_sys::console::error_1(&format!("WebSocket connection failed: {:?}", e).into());
            state.connection.set(ConnectionStatus::Error);
            return;
        }
    };

    state.connection.set(ConnectionStatus::Connecting);

    // On open
    let on_open = Closure::wrap(Box::new(move |_: JsValue| {
        web_sys::console::log_1(&"WebSocket connected".into());
        apply_event(state, SocketEvent::Open);
    }) as Box<dyn FnMut(JsValue)>);
    ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    on_open.forget();

    // On message
    let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Binary frames are not strings
        let Ok(text) = event.data().dyn_into::<js_sys::JsString>() else {
            return;
        };

        if let Err(err) = apply_frame(state, &String::from(text)) {
            web_sys::console::error_1(&format!("Bad message: {}", err).into());
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    on_message.forget();

    // On close
    let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
        web_sys::console::log_1(
            &format!("WebSocket closed: code={}, reason={}", event.code(), event.reason()).into(),
        );
        apply_event(state, SocketEvent::Close);
    }) as Box<dyn FnMut(CloseEvent)>);
    ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
    on_close.forget();

    // On error
    let on_error = Closure::wrap(Box::new(move |e: JsValue| {
        web_sys::console::error_1(&format!("WebSocket error: {:?}", e).into());
        apply_event(state, SocketEvent::Error);
    }) as Box<dyn FnMut(JsValue)>);
    ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();
}
