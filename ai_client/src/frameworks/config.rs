use std::env;
use std::time::Duration;

// Runtime/server constants and environment-derived configuration.

pub fn admin_port() -> u16 {
    env::var("AI_ADMIN_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3003)
}

pub fn game_server_ws_url() -> String {
    env::var("GAME_SERVER_WS_URL").unwrap_or_else(|_| "ws://localhost:3001/ws".to_string())
}

pub fn error_sleep() -> Duration {
    let millis = env::var("AI_ERROR_SLEEP_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1000);
    Duration::from_millis(millis)
}
