// Connection Frontend: accepts the WebSocket, splits it into a mailbox task
// (owns the sink, so request replies and update-consumer pushes never
// interleave on the wire) and a read loop that parses inbound JSON frames and
// calls straight into the Session Manager. Grounded on
// `interface_adapters::net::client`'s `ws_handler`/`handle_socket` shape,
// generalized from the lobby-join handshake to a stateless per-socket
// registration (a game server client is not required to present any
// credentials before issuing `new_game`/`join_game`).

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use protocol::{ClientMessage, ServerMessage};
use tokio::sync::mpsc;
use tracing::{info, info_span, warn};

use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::rng::rand_id;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let conn_id = rand_id();
    let span = info_span!("conn", conn_id);
    let _enter = span.enter();

    let (mut ws_tx, mut ws_rx) = socket.split();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ServerMessage>();

    state.sessions.connect(conn_id, out_tx).await;
    info!("client connected");

    let mailbox = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "failed to serialize outbound message");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(incoming) = ws_rx.next().await {
        match incoming {
            Ok(Message::Text(text)) => {
                if dispatch(&state, conn_id, &text).await.is_err() {
                    break; // protocol error: reply already sent, now close
                }
            }
            Ok(Message::Binary(_)) => {
                warn!("binary frame rejected");
                break;
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
            Err(e) => {
                warn!(error = %e, "websocket recv error");
                break;
            }
        }
    }

    state.sessions.disconnect(conn_id).await;
    mailbox.abort();
    info!("client disconnected");
}

/// Dispatches one inbound text frame. `Err(())` signals a protocol error: the
/// caller has already received an `error` frame and must close the socket.
async fn dispatch(state: &Arc<AppState>, conn_id: u64, text: &str) -> Result<(), ()> {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!(error = %e, "failed to parse client message");
            state
                .sessions
                .send_error(
                    conn_id,
                    ServerMessage::Error {
                        explanation: format!("malformed message: {e}"),
                    },
                )
                .await;
            return Err(());
        }
    };

    match message {
        ClientMessage::NewGame(req) => state.sessions.new_game(conn_id, req).await,
        ClientMessage::JoinGame(req) => state.sessions.join_game(conn_id, &req.key).await,
        ClientMessage::GameAction(req) => {
            state
                .sessions
                .route_action(conn_id, req.action_type, req.coords)
                .await
        }
        ClientMessage::ChatMessage(req) => {
            state.sessions.chat(conn_id, &req.text, req.timestamp).await
        }
    }
    Ok(())
}
