use thiserror::Error;

/// Errors surfaced by one bridge run. Never fatal to the admin server itself;
/// the bridge task that hit one simply ends.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to connect to game server: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("join_game was rejected: {0}")]
    JoinRejected(String),
    #[error("game server closed the connection")]
    Disconnected,
    #[error("malformed server message: {0}")]
    Malformed(#[from] serde_json::Error),
}
