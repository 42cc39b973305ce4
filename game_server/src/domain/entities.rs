// Domain-level shapes mirrored from the persistent schema. These are decoupled
// from sqlx's row types so the store adapter is the only layer that knows SQL.

/// A player's 10-character key row, as stored in `player_key`.
#[derive(Debug, Clone)]
pub struct PlayerKeyRow {
    pub key: String,
    pub game_id: i64,
    pub color: go_engine::Color,
    pub opponent_key: String,
    pub connected: bool,
    pub managed_by: Option<String>,
    pub ai_secret: Option<String>,
}

/// A single chat message, as stored in `chat`.
#[derive(Debug, Clone)]
pub struct ChatRow {
    pub id: i64,
    pub color: go_engine::Color,
    pub timestamp: f64,
    pub text: String,
}
