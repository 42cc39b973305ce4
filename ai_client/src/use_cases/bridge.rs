// The bridge loop: joins a game as an ordinary client, reacts to pushed
// state with the injected policy, and tears itself down when the game ends
// or the human opponent disconnects. One task per triggered AI player.

use std::sync::Arc;
use std::time::Duration;

use protocol::{
    ClientMessage, GameActionRequest, GameStatusValue, JoinGameRequest, ServerMessage,
};
use tracing::{info, warn};

use crate::domain::{AiPolicy, BridgeError};
use crate::interface_adapters::ws_client::GameConnection;

pub struct BridgeConfig {
    pub ws_url: String,
    pub error_sleep: Duration,
}

/// Runs until the game completes, the opponent disconnects, or the
/// connection is lost. Errors are the caller's to log; there is no retry
/// above this level, matching the original prototype's one-shot-per-trigger
/// bridge lifetime.
pub async fn run(
    config: BridgeConfig,
    player_key: String,
    policy: Arc<dyn AiPolicy>,
) -> Result<(), BridgeError> {
    let mut conn = GameConnection::connect(&config.ws_url).await?;
    conn.send(ClientMessage::JoinGame(JoinGameRequest {
        key: player_key.clone(),
    }));

    let mut our_color = None;
    let mut last_action: Option<GameActionRequest> = None;

    while let Some(message) = conn.inbound.recv().await {
        match message {
            ServerMessage::JoinGameResponse(resp) => {
                if !resp.success {
                    return Err(BridgeError::JoinRejected(resp.explanation));
                }
                our_color = resp.your_color;
                info!(key = %player_key, color = ?our_color, "joined game");
            }
            ServerMessage::NewGameResponse(_) => {
                warn!("unexpected new_game_response on an ai bridge socket; ignoring");
            }
            ServerMessage::GameStatus(status) => {
                if status.status == GameStatusValue::Complete {
                    info!(key = %player_key, "game complete, closing bridge");
                    break;
                }
                let Some(color) = our_color else {
                    warn!("game_status received before join completed; ignoring");
                    continue;
                };
                if status.status == GameStatusValue::Play && status.turn != color {
                    continue;
                }
                let mv = policy.select_action(&status, color);
                let action = GameActionRequest {
                    key: player_key.clone(),
                    action_type: mv.action_type,
                    coords: mv.coords,
                };
                conn.send(ClientMessage::GameAction(action.clone()));
                last_action = Some(action);
            }
            ServerMessage::GameActionResponse(resp) => {
                info!(key = %player_key, success = resp.success, explanation = %resp.explanation, "action response");
                if !resp.success {
                    if let Some(action) = last_action.clone() {
                        tokio::time::sleep(config.error_sleep).await;
                        conn.send(ClientMessage::GameAction(action));
                    }
                }
            }
            ServerMessage::OpponentConnected {
                opponent_connected: false,
            } => {
                info!(key = %player_key, "opponent disconnected, closing bridge");
                break;
            }
            ServerMessage::OpponentConnected { .. } => {}
            ServerMessage::Chat(entries) => {
                info!(key = %player_key, count = entries.len(), "chat received");
            }
            ServerMessage::Error { explanation } => {
                warn!(key = %player_key, %explanation, "server reported an error");
            }
        }
    }

    conn.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{SinkExt, StreamExt};
    use protocol::{ColorDto, GameResponseDto, GameStatusDto, GameStatusValue, PrisonersDto};
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message;

    fn empty_status(turn: ColorDto, status: GameStatusValue) -> GameStatusDto {
        GameStatusDto {
            board: vec![vec![None; 9]; 9],
            status,
            komi: 6.5,
            prisoners: PrisonersDto { white: 0, black: 0 },
            turn,
            time_played: 0.0,
        }
    }

    /// Drives a full join → act → opponent-disconnect lifecycle against a
    /// hand-rolled mock game server, confirming the bridge speaks the wire
    /// protocol correctly and exits when told the human left.
    #[tokio::test]
    async fn plays_one_move_then_exits_when_opponent_disconnects() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let (mut sink, mut source) = ws.split();

            let join = source.next().await.unwrap().unwrap();
            let join: ClientMessage = serde_json::from_str(join.to_text().unwrap()).unwrap();
            let ClientMessage::JoinGame(req) = join else {
                panic!("expected join_game, got {join:?}");
            };
            assert_eq!(req.key, "ai-key-1");

            let resp = ServerMessage::JoinGameResponse(GameResponseDto {
                success: true,
                explanation: "joined".into(),
                keys: None,
                your_color: Some(ColorDto::White),
            });
            sink.send(Message::Text(serde_json::to_string(&resp).unwrap().into()))
                .await
                .unwrap();

            let status = ServerMessage::GameStatus(empty_status(ColorDto::White, GameStatusValue::Play));
            sink.send(Message::Text(serde_json::to_string(&status).unwrap().into()))
                .await
                .unwrap();

            let action = source.next().await.unwrap().unwrap();
            let action: ClientMessage = serde_json::from_str(action.to_text().unwrap()).unwrap();
            let ClientMessage::GameAction(req) = action else {
                panic!("expected game_action, got {action:?}");
            };
            assert_eq!(req.action_type, protocol::ActionTypeDto::Place);

            let resp = ServerMessage::GameActionResponse(protocol::ActionResponseDto {
                success: true,
                explanation: "ok".into(),
            });
            sink.send(Message::Text(serde_json::to_string(&resp).unwrap().into()))
                .await
                .unwrap();

            let disconnect = ServerMessage::OpponentConnected {
                opponent_connected: false,
            };
            sink.send(Message::Text(serde_json::to_string(&disconnect).unwrap().into()))
                .await
                .unwrap();
        });

        let config = BridgeConfig {
            ws_url: format!("ws://{addr}"),
            error_sleep: Duration::from_millis(10),
        };
        let result = run(
            config,
            "ai-key-1".to_string(),
            Arc::new(crate::domain::HeuristicPolicy),
        )
        .await;

        assert!(result.is_ok());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn join_rejection_surfaces_as_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let (mut sink, _source) = ws.split();
            let resp = ServerMessage::JoinGameResponse(GameResponseDto {
                success: false,
                explanation: "not found".into(),
                keys: None,
                your_color: None,
            });
            sink.send(Message::Text(serde_json::to_string(&resp).unwrap().into()))
                .await
                .unwrap();
        });

        let config = BridgeConfig {
            ws_url: format!("ws://{addr}"),
            error_sleep: Duration::from_millis(10),
        };
        let result = run(
            config,
            "missing-key".to_string(),
            Arc::new(crate::domain::HeuristicPolicy),
        )
        .await;

        assert!(matches!(result, Err(BridgeError::JoinRejected(_))));
        server.await.unwrap();
    }
}
