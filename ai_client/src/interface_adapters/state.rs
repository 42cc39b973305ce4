// Shared admin-server state. Grounded on the small `AppState` struct every
// jet_raiders service defines for its axum router.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::AiPolicy;

#[derive(Clone)]
pub struct AppState {
    pub ws_url: Arc<str>,
    pub error_sleep: Duration,
    pub policy: Arc<dyn AiPolicy>,
}
