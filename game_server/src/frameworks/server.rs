// Process bootstrap: tracing/panic-hook init, database + store adapter wiring,
// and router assembly. Grounded on `head_server::frameworks::server`'s
// `init_tracing`/`run` shape, split into `run_on` (takes an already-bound
// listener, so integration tests can bind an ephemeral port exactly like
// `game_server`'s own teacher test harness does) and `run` (binds the
// configured port and delegates).

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{Notify, mpsc};

use crate::frameworks::{config, db};
use crate::interface_adapters::clients::ai::AiAdminClient;
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::store::PgStoreAdapter;
use crate::use_cases::{SessionManager, consumer};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("DATABASE_URL must be set: {0}")]
    MissingDatabaseUrl(#[from] std::env::VarError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("store error: {0}")]
    Store(#[from] crate::domain::StoreError),
    #[error("failed to build ai admin client: {0}")]
    AiAdmin(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Bind the configured port and serve until the process is killed.
pub async fn run() -> Result<(), BootstrapError> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let addr = SocketAddr::from(([0, 0, 0, 0], config::http_port()));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    run_on(listener).await
}

/// Bootstrap the coordination layer and serve on an already-bound listener.
/// Split out from [`run`] so integration tests can bind an ephemeral port.
pub async fn run_on(listener: TcpListener) -> Result<(), BootstrapError> {
    let database_url = config::database_url()?;
    let pool = db::connect_pool(&database_url).await?;
    db::run_migrations(&pool).await?;

    let store = Arc::new(PgStoreAdapter::new(pool).await?);
    let server_id: Arc<str> = Arc::from(config::server_id());

    // Crash recovery must complete before any socket is accepted: a prior
    // instance of this server id may have left keys `managed_by` itself.
    store.cleanup(&server_id).await?;
    tracing::info!(%server_id, "startup cleanup complete");

    let ai_admin = match config::ai_admin_url() {
        Some(url) => Some(AiAdminClient::new(url, config::ai_admin_timeout())?),
        None => {
            tracing::info!("AI_ADMIN_URL not set; vs=computer games will fail to trigger a bridge");
            None
        }
    };

    let sessions = Arc::new(SessionManager::new(store.clone(), server_id, ai_admin));

    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let shutdown = Arc::new(Notify::new());

    let notification_store = store.clone();
    let notification_server_id = sessions.server_id();
    let notification_sessions = sessions.clone();
    tokio::spawn(async move {
        notification_store
            .run_notification_loop(update_tx, notification_server_id, move || {
                let sessions = notification_sessions.clone();
                async move { sessions.bound_keys().await }
            })
            .await;
    });

    tokio::spawn(consumer::run(sessions.clone(), update_rx, shutdown.clone()));

    let state = Arc::new(AppState { sessions });
    let app = Router::new().route("/ws", get(ws_handler)).with_state(state);

    axum::serve(listener, app).await?;
    shutdown.notify_one();
    Ok(())
}
