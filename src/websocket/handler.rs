//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use super::hub::ConnectionHub;
use super::messages::ServerMessage;
use crate::api::AppState;
use crate::state::{now_ms, StateStore};

/// WebSocket upgrade handler
///
/// This is the entry point for dashboard connections at `GET /ws`.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.hub);
    let store = Arc::clone(&state.store);
    ws.on_upgrade(move |socket| handle_socket(socket, hub, store))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, hub: Arc<ConnectionHub>, store: Arc<StateStore>) {
    let (mut sender, mut receiver) = socket.split();

    let connection_id = match hub.register().await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting WebSocket connection");
            let error_msg = ServerMessage::Error {
                message: e.to_string(),
            };
            let _ = send_message(&mut sender, &error_msg).await;
            let _ = sender.send(Message::Close(None)).await;
            return;
        }
    };

    // Snapshot and subscription are taken together so no update falls between them
    let (initial, mut updates) = store.subscribe().await;
    tracing::debug!(
        connection_id = %connection_id,
        subscribers = store.subscriber_count(),
        "Subscribed to state updates"
    );
    if let Err(e) = send_message(&mut sender, &ServerMessage::init(now_ms(), initial)).await {
        tracing::error!(connection_id = %connection_id, error = %e, "Failed to send initial snapshot");
        hub.unregister(&connection_id).await;
        return;
    }

    let conn_id_for_send = connection_id.clone();

    // Task to forward state updates to the WebSocket
    let mut send_task = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(event) => {
                    if send_message(&mut sender, &ServerMessage::from(event))
                        .await
                        .is_err()
                    {
                        tracing::debug!(
                            connection_id = %conn_id_for_send,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Every message carries the full state, the next one catches the client up
                    tracing::warn!(
                        connection_id = %conn_id_for_send,
                        skipped,
                        "Client lagging, dropped updates"
                    );
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let conn_id_for_recv = connection_id.clone();

    // Task to drain the client side; dashboards never send anything meaningful
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection_id = %conn_id_for_recv, "Client requested close");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(
                        connection_id = %conn_id_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    hub.unregister(&connection_id).await;
}

/// Serialize and send one message
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let text = serde_json::to_string(message).map_err(axum::Error::new)?;
    sender.send(Message::Text(text)).await
}
