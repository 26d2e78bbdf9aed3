//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.
//! Each connection owns one dashboard [`Session`]; its messages are handled
//! one at a time, in arrival order.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::ConnectionHub;
use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::dashboard::{DashboardRegistry, Session};

/// WebSocket upgrade handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.ws_hub);
    let registry = Arc::clone(&state.registry);
    ws.on_upgrade(move |socket| handle_socket(socket, hub, registry))
}

fn encode(message: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(message) {
        Ok(text) => Some(Message::Text(text)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            None
        }
    }
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, hub: Arc<ConnectionHub>, registry: Arc<DashboardRegistry>) {
    let (mut sender, mut receiver) = socket.split();

    // Create channel for sending messages to this connection
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connection_id = match hub.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected WebSocket connection");
            if let Some(msg) = encode(&ServerMessage::error(&e)) {
                let _ = sender.send(msg).await;
            }
            return;
        }
    };

    let connected = ServerMessage::Connected {
        connection_id: connection_id.clone(),
    };
    if hub.send_to(&connection_id, connected).await.is_err() {
        hub.unregister(&connection_id).await;
        return;
    }

    let conn_id_for_send = connection_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Some(frame) = encode(&msg) else {
                continue;
            };
            if sender.send(frame).await.is_err() {
                tracing::debug!(
                    connection_id = %conn_id_for_send,
                    "WebSocket send failed, closing connection"
                );
                break;
            }
        }
    });

    let hub_for_recv = Arc::clone(&hub);
    let conn_id_for_recv = connection_id.clone();

    // Task to receive messages from WebSocket and handle them
    let mut recv_task = tokio::spawn(async move {
        let mut session = Session::new(registry);
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&hub_for_recv, &conn_id_for_recv, &mut session, msg).await {
                        break;
                    }
                }
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

/// Handle a received WebSocket frame
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(
    hub: &ConnectionHub,
    connection_id: &str,
    session: &mut Session,
    message: Message,
) -> bool {
    let replies = match message {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(client_msg) => process_client_message(session, client_msg),
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    "Invalid client message"
                );
                vec![ServerMessage::error(format!("Invalid message format: {}", e))]
            }
        },
        Message::Binary(_) => vec![ServerMessage::error("Binary messages not supported")],
        // Axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => Vec::new(),
        Message::Close(_) => {
            tracing::debug!(connection_id = %connection_id, "Client requested close");
            return false;
        }
    };

    for reply in replies {
        if hub.send_to(connection_id, reply).await.is_err() {
            return false;
        }
    }
    true
}

/// Apply a client message to the session and build the replies
pub(crate) fn process_client_message(
    session: &mut Session,
    message: ClientMessage,
) -> Vec<ServerMessage> {
    match message {
        ClientMessage::Open { dashboard } => match session.open(&dashboard) {
            Ok((layout, outputs)) => vec![
                ServerMessage::Layout {
                    dashboard: dashboard.clone(),
                    layout,
                },
                ServerMessage::Outputs {
                    dashboard,
                    sequence: session.next_sequence(),
                    outputs,
                },
            ],
            Err(e) => vec![ServerMessage::error(e)],
        },
        ClientMessage::SetInput {
            dashboard,
            input_id,
            value,
        } => match session.set_input(&dashboard, &input_id, value) {
            Ok(outputs) => vec![ServerMessage::Outputs {
                dashboard,
                sequence: session.next_sequence(),
                outputs,
            }],
            Err(e) => vec![ServerMessage::error(e)],
        },
        ClientMessage::Close { dashboard } => match session.close(&dashboard) {
            Ok(()) => vec![ServerMessage::Closed { dashboard }],
            Err(e) => vec![ServerMessage::error(e)],
        },
        ClientMessage::Ping => vec![ServerMessage::Pong],
    }
}
