// Use-case level shapes: what the Session Manager keeps in memory per socket.

use crate::domain::ChatRow;

/// Identifies one WebSocket connection on this server. Assigned at connect
/// time; stable for the lifetime of the socket.
pub type ConnId = u64;

/// In-memory record for a socket bound to a game. Created by `new_game` or
/// `join_game`; destroyed by `unsubscribe`. Mutated only by the update
/// consumer once created (request handlers read it, but any change to cached
/// state goes through a store round trip first).
pub struct ClientRecord {
    pub key: String,
    pub opponent_key: String,
    pub color: go_engine::Color,
    pub game: go_engine::Game,
    pub chat: Vec<ChatRow>,
    pub opponent_connected: bool,
    pub started_at: std::time::Instant,
}
