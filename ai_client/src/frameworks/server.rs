// Process bootstrap: tracing/panic-hook init, router assembly, serve.
// Grounded on `head_server::frameworks::server`'s `init_tracing`/`run` shape.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::HeuristicPolicy;
use crate::frameworks::config;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;

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

pub async fn run() {
    let _ = dotenvy::dotenv();
    init_tracing();

    let state = AppState {
        ws_url: Arc::from(config::game_server_ws_url()),
        error_sleep: config::error_sleep(),
        policy: Arc::new(HeuristicPolicy),
    };

    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config::admin_port()));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return;
        }
    };
    tracing::info!(%addr, "listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
    }
}
