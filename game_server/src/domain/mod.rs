// Domain layer: entities and ports the rest of the coordination layer depends on.

pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::{ChatRow, PlayerKeyRow};
pub use errors::{SessionError, StoreError};
pub use ports::{JoinOutcome, StoreAdapter, UpdateKind};
