mod domain;
mod frameworks;
mod interface_adapters;
mod use_cases;

use frameworks::server;

#[tokio::main]
async fn main() {
    if let Err(e) = server::run().await {
        tracing::error!(error = %e, "game_server exited");
    }
}
