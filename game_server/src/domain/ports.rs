// Port the session use-case depends on, so it is testable without a live
// Postgres instance. The only production implementation is
// `interface_adapters::store::PgStoreAdapter`.

use async_trait::async_trait;

use crate::domain::entities::{ChatRow, PlayerKeyRow};
use crate::domain::errors::StoreError;

/// Result of attempting to join a game by key.
#[derive(Debug, Clone)]
pub enum JoinOutcome {
    /// No such key.
    Dne,
    /// Key exists but is already connected on some server.
    InUse,
    /// Ownership acquired; both keys of the game are returned.
    Success { key_w: String, key_b: String },
}

/// The three channel families a player key is subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    GameStatus,
    Chat,
    OpponentConnected,
}

#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// Release every PlayerKey this server owns. Must run before anything else.
    async fn cleanup(&self, server_id: &str) -> Result<(), StoreError>;

    /// Create a new game plus its two keys. `requested_color` is the color the
    /// requesting human wants to bind to immediately; `ai_secret` is set on the
    /// row of whichever color is NOT `requested_color` when this is an AI game.
    async fn new_game(
        &self,
        blob: Vec<u8>,
        key_w: &str,
        key_b: &str,
        requested_color: go_engine::Color,
        ai_secret: Option<&str>,
        server_id: &str,
    ) -> Result<(), StoreError>;

    async fn join_game(&self, key: &str, server_id: &str) -> Result<JoinOutcome, StoreError>;

    /// CAS write. `Ok(false)` means preempted, not an error.
    async fn write_game(&self, key: &str, blob: Vec<u8>, new_version: i64) -> Result<bool, StoreError>;

    /// `Ok(false)` means the key does not exist.
    async fn write_chat(&self, key: &str, timestamp: f64, text: &str) -> Result<bool, StoreError>;

    /// Emit synthetic notifications for game/chat/opponent-connected for `key`.
    async fn trigger_update_all(&self, key: &str) -> Result<(), StoreError>;

    /// `Ok(true)` iff this server still owned the key and released it.
    async fn unsubscribe(&self, key: &str, server_id: &str) -> Result<bool, StoreError>;

    /// Register `LISTEN` on the three channels for `key`.
    async fn subscribe(&self, key: &str) -> Result<(), StoreError>;

    /// `UNLISTEN` the three channels for `key`.
    async fn unlisten(&self, key: &str) -> Result<(), StoreError>;

    async fn fetch_game(&self, key: &str) -> Result<(Vec<u8>, i64), StoreError>;

    async fn fetch_chat_since(&self, key: &str, after_id: i64) -> Result<Vec<ChatRow>, StoreError>;

    async fn fetch_opponent_connected(&self, key: &str) -> Result<bool, StoreError>;

    async fn fetch_player_key(&self, key: &str) -> Result<Option<PlayerKeyRow>, StoreError>;
}
