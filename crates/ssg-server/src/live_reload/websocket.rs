//! WebSocket handler for live reload.
//!
//! The client's first message is the path it has open, sent as text. After
//! that the server pushes the page at that path after every rebuild.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code};
use axum::response::IntoResponse;

use crate::routes::Route;
use crate::state::AppState;

/// Handle WebSocket upgrade for live reload.
pub(crate) async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let path = match socket.recv().await {
        Some(Ok(Message::Text(path))) => path.as_str().to_owned(),
        Some(Ok(Message::Close(_)) | Err(_)) | None => return,
        Some(Ok(_)) => {
            tracing::warn!("Live reload client sent a non-text subscription, closing");
            let close = CloseFrame {
                code: close_code::PROTOCOL,
                reason: "expected the page path as a text message".into(),
            };
            let _ = socket.send(Message::Close(Some(close))).await;
            return;
        }
    };

    // Dropping the guard unregisters the client on every exit path
    let (_guard, mut updates) = state.clients.register(path);

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(route) = update else { break };
                if socket.send(to_message(route)).await.is_err() {
                    break;
                }
            }
            // Handle client messages (close or keepalive)
            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}

/// Text frame for UTF-8 content, binary otherwise.
fn to_message(route: Route) -> Message {
    match String::from_utf8(route.content.to_vec()) {
        Ok(text) => Message::Text(text.into()),
        Err(_) => Message::Binary(route.content),
    }
}
