//! WebSocket endpoint
//!
//! - GET /ws - Upgrade to a persistent connection fed by the notification
//!   hub. The server pushes cancellation events as JSON text frames; frames
//!   sent by the client carry no protocol meaning and are drained.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};

use crate::api::middleware::AppState;
use crate::hub::NotificationHub;

/// GET /ws - Register the connection with the notification hub
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.hub))
}

async fn handle_socket(socket: WebSocket, hub: NotificationHub) {
    let (id, mut events) = hub.subscribe();
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(payload) => {
                        if sender.send(Message::Text(payload.into())).await.is_err() {
                            break;
                        }
                    }
                    // The hub dropped this subscriber
                    None => break,
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    hub.unsubscribe(id);
}
