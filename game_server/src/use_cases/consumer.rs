// Update consumer loop: drains the mpsc fed by the store adapter's
// notification listener and applies each update through the Session Manager.
// A single task per server instance, independent of how many sockets are
// connected to it.

use std::sync::Arc;

use tokio::sync::{Notify, mpsc};

use crate::domain::{StoreAdapter, UpdateKind};
use crate::use_cases::session_manager::SessionManager;

pub async fn run<S: StoreAdapter>(
    sessions: Arc<SessionManager<S>>,
    mut updates: mpsc::UnboundedReceiver<(UpdateKind, String, Option<String>)>,
    shutdown: Arc<Notify>,
) {
    loop {
        tokio::select! {
            update = updates.recv() => {
                match update {
                    Some((kind, key, payload)) => sessions.dispatch_update(kind, key, payload).await,
                    None => {
                        tracing::warn!("update channel closed; consumer loop exiting");
                        return;
                    }
                }
            }
            _ = shutdown.notified() => {
                tracing::info!("update consumer loop shutting down");
                return;
            }
        }
    }
}
