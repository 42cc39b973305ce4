// Session Manager: owns `{conn_id -> ClientRecord}` and the reverse
// `{player_key -> conn_id}`, translates inbound requests into Store Adapter
// calls, and turns notifications into outbound frames. Grounded on
// `lobby.rs`'s `LobbyRegistry` (registry of handles behind an `RwLock`,
// per-entry channels) generalized from "lobby of match worlds" to "registry
// of connected player-key clients".

use std::collections::HashMap;
use std::sync::Arc;

use protocol::{
    ActionResponseDto, ChatEntryDto, GameResponseDto, GameStatusDto, KeysDto, NewGameRequest,
    PrisonersDto, ServerMessage, Vs,
};
use tokio::sync::{RwLock, mpsc};

use crate::domain::{ChatRow, JoinOutcome, StoreAdapter, UpdateKind};
use crate::interface_adapters::clients::ai::AiAdminClient;
use crate::interface_adapters::utils::keygen;
use crate::use_cases::convert::{action_from_dto, board_to_dto, color_from_dto, color_to_dto, status_to_dto};
use crate::use_cases::types::{ClientRecord, ConnId};

pub struct SessionManager<S: StoreAdapter> {
    store: Arc<S>,
    server_id: Arc<str>,
    ai_admin: Option<AiAdminClient>,
    sockets: RwLock<HashMap<ConnId, mpsc::UnboundedSender<ServerMessage>>>,
    clients: RwLock<HashMap<ConnId, ClientRecord>>,
    key_to_conn: RwLock<HashMap<String, ConnId>>,
}

impl<S: StoreAdapter> SessionManager<S> {
    pub fn new(store: Arc<S>, server_id: Arc<str>, ai_admin: Option<AiAdminClient>) -> Self {
        Self {
            store,
            server_id,
            ai_admin,
            sockets: RwLock::new(HashMap::new()),
            clients: RwLock::new(HashMap::new()),
            key_to_conn: RwLock::new(HashMap::new()),
        }
    }

    /// Register a freshly accepted socket's outbound mailbox. Must happen
    /// before any inbound message is processed for `conn_id`.
    pub async fn connect(&self, conn_id: ConnId, out_tx: mpsc::UnboundedSender<ServerMessage>) {
        self.sockets.write().await.insert(conn_id, out_tx);
    }

    /// Socket closed. Idempotent: a second call for the same `conn_id` is a no-op.
    pub async fn disconnect(&self, conn_id: ConnId) {
        self.unsubscribe_internal(conn_id).await;
        self.sockets.write().await.remove(&conn_id);
    }

    /// Used by the connection frontend to report framing errors that occur
    /// before a request can be routed to any other method below.
    pub async fn send_error(&self, conn_id: ConnId, msg: ServerMessage) {
        self.send(conn_id, msg).await;
    }

    pub async fn new_game(&self, conn_id: ConnId, req: NewGameRequest) {
        self.unsubscribe_internal(conn_id).await;

        let requested_color = color_from_dto(req.color);
        let game = go_engine::Game::new(req.size, req.komi);
        let blob = game.encode();
        let ai_secret = matches!(req.vs, Vs::Computer).then(keygen::generate_key);

        let mut key_w = keygen::generate_key();
        let mut key_b = keygen::generate_key();
        let mut attempt = self
            .store
            .new_game(
                blob.clone(),
                &key_w,
                &key_b,
                requested_color,
                ai_secret.as_deref(),
                &self.server_id,
            )
            .await;

        if matches!(attempt, Err(crate::domain::StoreError::KeyConflict)) {
            tracing::warn!("key collision on new_game, retrying once");
            key_w = keygen::generate_key();
            key_b = keygen::generate_key();
            attempt = self
                .store
                .new_game(
                    blob,
                    &key_w,
                    &key_b,
                    requested_color,
                    ai_secret.as_deref(),
                    &self.server_id,
                )
                .await;
        }

        match attempt {
            Ok(()) => {
                let (own_key, opponent_key) = match requested_color {
                    go_engine::Color::White => (key_w.clone(), key_b.clone()),
                    go_engine::Color::Black => (key_b.clone(), key_w.clone()),
                };

                self.bind(conn_id, &own_key, &opponent_key, requested_color, game)
                    .await;
                if let Err(e) = self.store.subscribe(&own_key).await {
                    tracing::error!(error = %e, key = %own_key, "failed to subscribe after new_game");
                }

                self.send(
                    conn_id,
                    ServerMessage::NewGameResponse(GameResponseDto {
                        success: true,
                        explanation: String::new(),
                        keys: Some(KeysDto {
                            white: key_w,
                            black: key_b,
                        }),
                        your_color: Some(req.color),
                    }),
                )
                .await;

                if let Some(secret) = ai_secret {
                    self.trigger_ai(&opponent_key, &secret).await;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "new_game failed after retry");
                self.send(
                    conn_id,
                    ServerMessage::NewGameResponse(GameResponseDto {
                        success: false,
                        explanation: e.to_string(),
                        keys: None,
                        your_color: None,
                    }),
                )
                .await;
            }
        }
    }

    pub async fn join_game(&self, conn_id: ConnId, key: &str) {
        if self.is_bound(conn_id).await {
            self.send(
                conn_id,
                ServerMessage::JoinGameResponse(GameResponseDto {
                    success: false,
                    explanation: "already playing".into(),
                    keys: None,
                    your_color: None,
                }),
            )
            .await;
            return;
        }

        match self.store.join_game(key, &self.server_id).await {
            Ok(JoinOutcome::Dne) => {
                self.send(
                    conn_id,
                    ServerMessage::JoinGameResponse(GameResponseDto {
                        success: false,
                        explanation: "not found".into(),
                        keys: None,
                        your_color: None,
                    }),
                )
                .await;
            }
            Ok(JoinOutcome::InUse) => {
                self.send(
                    conn_id,
                    ServerMessage::JoinGameResponse(GameResponseDto {
                        success: false,
                        explanation: "someone already connected".into(),
                        keys: None,
                        your_color: None,
                    }),
                )
                .await;
            }
            Ok(JoinOutcome::Success { key_w, key_b }) => {
                let (own_key, opponent_key, color) = if key == key_w {
                    (key_w.clone(), key_b.clone(), go_engine::Color::White)
                } else {
                    (key_b.clone(), key_w.clone(), go_engine::Color::Black)
                };

                let (blob, _version) = match self.store.fetch_game(&own_key).await {
                    Ok(v) => v,
                    Err(e) => {
                        tracing::error!(error = %e, "fetch_game failed after join");
                        self.send_join_failure(conn_id, "internal error").await;
                        return;
                    }
                };
                let game = match go_engine::Game::decode(&blob) {
                    Ok(g) => g,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to decode game blob after join");
                        self.send_join_failure(conn_id, "internal error").await;
                        return;
                    }
                };

                self.bind(conn_id, &own_key, &opponent_key, color, game).await;
                if let Err(e) = self.store.subscribe(&own_key).await {
                    tracing::error!(error = %e, key = %own_key, "failed to subscribe after join_game");
                }

                self.send(
                    conn_id,
                    ServerMessage::JoinGameResponse(GameResponseDto {
                        success: true,
                        explanation: String::new(),
                        keys: Some(KeysDto {
                            white: key_w,
                            black: key_b,
                        }),
                        your_color: Some(color_to_dto(color)),
                    }),
                )
                .await;

                if let Err(e) = self.store.trigger_update_all(&own_key).await {
                    tracing::error!(error = %e, key = %own_key, "trigger_update_all failed");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "join_game store call failed");
                self.send_join_failure(conn_id, "transient store error").await;
            }
        }
    }

    async fn send_join_failure(&self, conn_id: ConnId, explanation: &str) {
        self.send(
            conn_id,
            ServerMessage::JoinGameResponse(GameResponseDto {
                success: false,
                explanation: explanation.to_string(),
                keys: None,
                your_color: None,
            }),
        )
        .await;
    }

    pub async fn route_action(
        &self,
        conn_id: ConnId,
        action_type: protocol::ActionTypeDto,
        coords: Option<protocol::CoordsDto>,
    ) {
        let Some((key, color, mut game)) = self.snapshot(conn_id).await else {
            self.send(
                conn_id,
                ServerMessage::GameActionResponse(ActionResponseDto {
                    success: false,
                    explanation: "no active game".into(),
                }),
            )
            .await;
            return;
        };

        let action = action_from_dto(action_type, coords);
        if let Err(violation) = game.apply(color, action) {
            self.send(
                conn_id,
                ServerMessage::GameActionResponse(ActionResponseDto {
                    success: false,
                    explanation: violation.to_string(),
                }),
            )
            .await;
            return;
        }

        let new_version = game.version() as i64;
        let blob = game.encode();
        match self.store.write_game(&key, blob, new_version).await {
            Ok(true) => {
                let mut clients = self.clients.write().await;
                if let Some(record) = clients.get_mut(&conn_id) {
                    record.game = game;
                }
                drop(clients);
                self.send(
                    conn_id,
                    ServerMessage::GameActionResponse(ActionResponseDto {
                        success: true,
                        explanation: String::new(),
                    }),
                )
                .await;
            }
            Ok(false) => {
                self.refresh_cached_game(conn_id, &key).await;
                self.send(
                    conn_id,
                    ServerMessage::GameActionResponse(ActionResponseDto {
                        success: false,
                        explanation: "preempted; state refreshed".into(),
                    }),
                )
                .await;
            }
            Err(e) => {
                tracing::error!(error = %e, key = %key, "write_game failed");
                self.send(
                    conn_id,
                    ServerMessage::GameActionResponse(ActionResponseDto {
                        success: false,
                        explanation: "transient store error".into(),
                    }),
                )
                .await;
            }
        }
    }

    pub async fn chat(&self, conn_id: ConnId, text: &str, timestamp: f64) {
        let key = {
            let clients = self.clients.read().await;
            clients.get(&conn_id).map(|r| r.key.clone())
        };
        let Some(key) = key else {
            self.send(
                conn_id,
                ServerMessage::Error {
                    explanation: "no active game".into(),
                },
            )
            .await;
            return;
        };

        match self.store.write_chat(&key, timestamp, text).await {
            Ok(true) => {}
            Ok(false) => {
                self.send(
                    conn_id,
                    ServerMessage::Error {
                        explanation: "unknown key".into(),
                    },
                )
                .await;
            }
            Err(e) => {
                tracing::error!(error = %e, key = %key, "write_chat failed");
                self.send(
                    conn_id,
                    ServerMessage::Error {
                        explanation: "transient store error".into(),
                    },
                )
                .await;
            }
        }
    }

    /// Drains one dequeued notification from the update consumer loop.
    pub async fn dispatch_update(&self, kind: UpdateKind, key: String, payload: Option<String>) {
        let Some(conn_id) = self.key_to_conn.read().await.get(&key).copied() else {
            tracing::debug!(%key, "notification for unknown key; dropping");
            return;
        };

        match kind {
            UpdateKind::GameStatus => self.dispatch_game_status(conn_id, &key).await,
            UpdateKind::Chat => self.dispatch_chat(conn_id, &key).await,
            UpdateKind::OpponentConnected => {
                self.dispatch_opponent_connected(conn_id, &key, payload).await
            }
        }
    }

    async fn dispatch_game_status(&self, conn_id: ConnId, key: &str) {
        let (blob, version) = match self.store.fetch_game(key).await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, %key, "fetch_game failed in consumer");
                return;
            }
        };

        let mut clients = self.clients.write().await;
        let Some(record) = clients.get_mut(&conn_id) else {
            return;
        };
        if version <= record.game.version() as i64 {
            return; // stale notification
        }
        let fresh = match go_engine::Game::decode(&blob) {
            Ok(g) => g,
            Err(e) => {
                tracing::error!(error = %e, %key, "failed to decode game in consumer");
                return;
            }
        };
        record.game = fresh;
        let dto = game_status_dto(record);
        drop(clients);
        self.send(conn_id, ServerMessage::GameStatus(dto)).await;
    }

    async fn dispatch_chat(&self, conn_id: ConnId, key: &str) {
        let last_id = {
            let clients = self.clients.read().await;
            clients
                .get(&conn_id)
                .and_then(|r| r.chat.last().map(|c| c.id))
                .unwrap_or(0)
        };

        let rows = match self.store.fetch_chat_since(key, last_id).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, %key, "fetch_chat_since failed in consumer");
                return;
            }
        };
        if rows.is_empty() {
            return;
        }

        let dtos: Vec<ChatEntryDto> = rows.iter().map(chat_row_to_dto).collect();
        let mut clients = self.clients.write().await;
        if let Some(record) = clients.get_mut(&conn_id) {
            record.chat.extend(rows);
        }
        drop(clients);
        self.send(conn_id, ServerMessage::Chat(dtos)).await;
    }

    async fn dispatch_opponent_connected(&self, conn_id: ConnId, key: &str, payload: Option<String>) {
        let connected = match payload {
            Some(p) => p == "1",
            None => match self.store.fetch_opponent_connected(key).await {
                Ok(v) => v,
                Err(e) => {
                    tracing::error!(error = %e, %key, "fetch_opponent_connected failed in consumer");
                    return;
                }
            },
        };

        let mut clients = self.clients.write().await;
        let Some(record) = clients.get_mut(&conn_id) else {
            return;
        };
        if record.opponent_connected == connected {
            return;
        }
        record.opponent_connected = connected;
        drop(clients);
        self.send(
            conn_id,
            ServerMessage::OpponentConnected {
                opponent_connected: connected,
            },
        )
        .await;
    }

    async fn trigger_ai(&self, opponent_key: &str, ai_secret: &str) {
        let Some(ai_admin) = &self.ai_admin else {
            tracing::warn!("vs=computer requested but no AI admin configured");
            return;
        };
        if let Err(e) = ai_admin.trigger(opponent_key, ai_secret).await {
            tracing::error!(error = %e, "failed to trigger AI bridge");
        }
    }

    async fn refresh_cached_game(&self, conn_id: ConnId, key: &str) {
        let (blob, _version) = match self.store.fetch_game(key).await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, %key, "failed to refetch preempted game");
                return;
            }
        };
        let fresh = match go_engine::Game::decode(&blob) {
            Ok(g) => g,
            Err(e) => {
                tracing::error!(error = %e, %key, "failed to decode refetched game");
                return;
            }
        };
        let mut clients = self.clients.write().await;
        if let Some(record) = clients.get_mut(&conn_id) {
            record.game = fresh;
        }
    }

    async fn snapshot(&self, conn_id: ConnId) -> Option<(String, go_engine::Color, go_engine::Game)> {
        let clients = self.clients.read().await;
        let record = clients.get(&conn_id)?;
        Some((record.key.clone(), record.color, record.game.clone()))
    }

    async fn is_bound(&self, conn_id: ConnId) -> bool {
        self.clients.read().await.contains_key(&conn_id)
    }

    /// Every player key this server currently believes it owns. Used to
    /// rebuild `LISTEN`s after a store reconnect.
    pub async fn bound_keys(&self) -> Vec<String> {
        self.key_to_conn.read().await.keys().cloned().collect()
    }

    pub fn server_id(&self) -> Arc<str> {
        self.server_id.clone()
    }

    async fn bind(
        &self,
        conn_id: ConnId,
        key: &str,
        opponent_key: &str,
        color: go_engine::Color,
        game: go_engine::Game,
    ) {
        let record = ClientRecord {
            key: key.to_string(),
            opponent_key: opponent_key.to_string(),
            color,
            game,
            chat: Vec::new(),
            opponent_connected: false,
            started_at: std::time::Instant::now(),
        };
        self.clients.write().await.insert(conn_id, record);
        self.key_to_conn.write().await.insert(key.to_string(), conn_id);
    }

    async fn unsubscribe_internal(&self, conn_id: ConnId) {
        let removed = self.clients.write().await.remove(&conn_id);
        let Some(record) = removed else {
            return;
        };
        self.key_to_conn.write().await.remove(&record.key);

        if let Err(e) = self.store.unsubscribe(&record.key, &self.server_id).await {
            tracing::error!(error = %e, key = %record.key, "unsubscribe store call failed");
        }
        if let Err(e) = self.store.unlisten(&record.key).await {
            tracing::error!(error = %e, key = %record.key, "failed to unlisten");
        }
    }

    async fn send(&self, conn_id: ConnId, msg: ServerMessage) {
        let sockets = self.sockets.read().await;
        if let Some(tx) = sockets.get(&conn_id) {
            let _ = tx.send(msg);
        }
    }
}

fn game_status_dto(record: &ClientRecord) -> GameStatusDto {
    let prisoners = record.game.prisoners();
    GameStatusDto {
        board: board_to_dto(record.game.board()),
        status: status_to_dto(record.game.status()),
        komi: record.game.komi(),
        prisoners: PrisonersDto {
            white: prisoners.white,
            black: prisoners.black,
        },
        turn: color_to_dto(record.game.turn()),
        time_played: record.started_at.elapsed().as_secs_f64(),
    }
}

fn chat_row_to_dto(row: &ChatRow) -> ChatEntryDto {
    ChatEntryDto {
        timestamp: row.timestamp,
        color: color_to_dto(row.color),
        text: row.text.clone(),
        id: row.id,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use protocol::{ActionTypeDto, ColorDto, CoordsDto, NewGameRequest, Vs};
    use tokio::sync::mpsc;

    use super::SessionManager;
    use crate::domain::UpdateKind;
    use crate::use_cases::test_support::FakeStore;

    async fn recv(rx: &mut mpsc::UnboundedReceiver<ServerMessage>) -> ServerMessage {
        tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .expect("response within deadline")
            .expect("sender still alive")
    }

    fn new_game_req() -> NewGameRequest {
        new_game_req_color(ColorDto::Black)
    }

    fn new_game_req_color(color: ColorDto) -> NewGameRequest {
        NewGameRequest {
            vs: Vs::Human,
            color,
            size: 9,
            komi: 6.5,
        }
    }

    #[tokio::test]
    async fn new_game_happy_path_binds_the_requested_color_and_reports_keys() {
        let store = Arc::new(FakeStore::new());
        let sessions = Arc::new(SessionManager::new(store.clone(), Arc::from("s1"), None));
        let (tx, mut rx) = mpsc::unbounded_channel();
        sessions.connect(1, tx).await;

        sessions.new_game(1, new_game_req()).await;

        let ServerMessage::NewGameResponse(resp) = recv(&mut rx).await else {
            panic!("expected new_game_response");
        };
        assert!(resp.success);
        let keys = resp.keys.expect("keys present on success");
        assert_eq!(resp.your_color, Some(ColorDto::Black));
        assert_eq!(store.managed_by(&keys.black).as_deref(), Some("s1"));
        assert_eq!(store.managed_by(&keys.white), None);
    }

    #[tokio::test]
    async fn cross_server_join_and_action_reach_both_sockets() {
        // Two `SessionManager`s sharing one `FakeStore`, standing in for two
        // server processes talking to the same Postgres instance.
        let store = Arc::new(FakeStore::new());
        let s1 = Arc::new(SessionManager::new(store.clone(), Arc::from("s1"), None));
        let s2 = Arc::new(SessionManager::new(store.clone(), Arc::from("s2"), None));

        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        s1.connect(1, tx_a).await;
        s1.new_game(1, new_game_req()).await;
        let ServerMessage::NewGameResponse(resp) = recv(&mut rx_a).await else {
            panic!("expected new_game_response");
        };
        let keys = resp.keys.expect("keys present");

        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        s2.connect(2, tx_b).await;
        s2.join_game(2, &keys.white).await;
        let ServerMessage::JoinGameResponse(join_resp) = recv(&mut rx_b).await else {
            panic!("expected join_game_response");
        };
        assert!(join_resp.success);
        assert_eq!(join_resp.your_color, Some(ColorDto::White));

        // White (on s2) places a stone; both sides' caches should observe it.
        s2.route_action(2, ActionTypeDto::Place, Some(CoordsDto { row: 4, col: 4 }))
            .await;
        let ServerMessage::GameActionResponse(action_resp) = recv(&mut rx_b).await else {
            panic!("expected game_action_response");
        };
        assert!(action_resp.success);
        assert_eq!(store.version_of(&keys.white), 1);

        // s1 (black, still tracking its own cache) learns about the write via
        // the same notification path the real listener would use.
        s1.dispatch_update(UpdateKind::GameStatus, keys.black.clone(), None)
            .await;
        let ServerMessage::GameStatus(status) = recv(&mut rx_a).await else {
            panic!("expected game_status push");
        };
        assert_eq!(status.turn, ColorDto::Black);
    }

    #[tokio::test]
    async fn cas_preemption_refreshes_the_cache_instead_of_erroring() {
        let store = Arc::new(FakeStore::new());
        let sessions = Arc::new(SessionManager::new(store.clone(), Arc::from("s1"), None));
        let (tx, mut rx) = mpsc::unbounded_channel();
        sessions.connect(1, tx).await;
        sessions.new_game(1, new_game_req_color(ColorDto::White)).await;
        let ServerMessage::NewGameResponse(resp) = recv(&mut rx).await else {
            panic!("expected new_game_response");
        };
        let keys = resp.keys.expect("keys present");

        // A remote server commits version 1 (white passes) behind this
        // session's back, using the same target version this session is
        // about to compute locally.
        let mut remote_game = go_engine::Game::new(9, 6.5);
        remote_game.apply(go_engine::Color::White, go_engine::Action::Pass).unwrap();
        store
            .write_game(&keys.white, remote_game.encode(), remote_game.version() as i64)
            .await
            .unwrap();

        sessions
            .route_action(1, ActionTypeDto::Pass, None)
            .await;
        let ServerMessage::GameActionResponse(resp) = recv(&mut rx).await else {
            panic!("expected game_action_response");
        };
        assert!(!resp.success);
        assert_eq!(resp.explanation, "preempted; state refreshed");
    }

    #[tokio::test]
    async fn unsubscribe_is_idempotent() {
        let store = Arc::new(FakeStore::new());
        let sessions = Arc::new(SessionManager::new(store.clone(), Arc::from("s1"), None));
        let (tx, _rx) = mpsc::unbounded_channel();
        sessions.connect(1, tx).await;
        sessions.new_game(1, new_game_req()).await;

        sessions.disconnect(1).await;
        // A second disconnect for a socket with nothing bound is a no-op, not
        // a panic or a duplicate store call.
        sessions.disconnect(1).await;
    }

    #[tokio::test]
    async fn join_in_use_rejects_without_subscribing() {
        let store = Arc::new(FakeStore::new());
        let s1 = Arc::new(SessionManager::new(store.clone(), Arc::from("s1"), None));
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        s1.connect(1, tx_a).await;
        s1.new_game(1, new_game_req()).await;
        let ServerMessage::NewGameResponse(resp) = recv(&mut rx_a).await else {
            panic!("expected new_game_response");
        };
        let keys = resp.keys.expect("keys present");

        let s2 = Arc::new(SessionManager::new(store.clone(), Arc::from("s2"), None));
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        s2.connect(2, tx_b).await;
        s2.join_game(2, &keys.black).await;

        let ServerMessage::JoinGameResponse(resp) = recv(&mut rx_b).await else {
            panic!("expected join_game_response");
        };
        assert!(!resp.success);
        assert_eq!(resp.explanation, "someone already connected");
    }

    #[tokio::test]
    async fn action_rejected_by_rules_engine_does_not_touch_the_store() {
        let store = Arc::new(FakeStore::new());
        let sessions = Arc::new(SessionManager::new(store.clone(), Arc::from("s1"), None));
        let (tx, mut rx) = mpsc::unbounded_channel();
        sessions.connect(1, tx).await;
        sessions.new_game(1, new_game_req()).await;
        let ServerMessage::NewGameResponse(resp) = recv(&mut rx).await else {
            panic!("expected new_game_response");
        };
        let keys = resp.keys.expect("keys present");
        let version_before = store.version_of(&keys.black);

        // Black moves out of turn: white opens.
        sessions
            .route_action(1, ActionTypeDto::Place, Some(CoordsDto { row: 0, col: 0 }))
            .await;

        let ServerMessage::GameActionResponse(resp) = recv(&mut rx).await else {
            panic!("expected game_action_response");
        };
        assert!(!resp.success);
        assert_eq!(store.version_of(&keys.black), version_before);
    }
}
