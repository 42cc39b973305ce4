// Shared application state handed to every Axum handler. Grounded on
// `auth_server`'s `AppState` (a plain struct of `Arc`/`PgPool` fields behind
// `with_state`), generalized to wrap the Session Manager instead of raw
// session storage.

use std::sync::Arc;

use crate::interface_adapters::store::PgStoreAdapter;
use crate::use_cases::session_manager::SessionManager;

pub struct AppState {
    pub sessions: Arc<SessionManager<PgStoreAdapter>>,
}
