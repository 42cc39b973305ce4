// Domain-level errors. `thiserror` gives every variant a `Display` for free so
// call sites can `tracing::error!(error = %e, ...)` uniformly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key already exists")]
    KeyConflict,
    #[error("store is temporarily unavailable: {0}")]
    Transient(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("socket is already bound to a game")]
    AlreadyPlaying,
    #[error("no active game for this socket")]
    NoActiveGame,
    #[error("illegal move: {0}")]
    RuleViolation(#[from] go_engine::RuleViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
}
