use std::{env, fs, time::Duration};

// Runtime/server constants and environment-derived configuration.

pub fn http_port() -> u16 {
    env::var("GAME_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn database_url() -> Result<String, env::VarError> {
    env::var("DATABASE_URL")
}

pub fn ai_admin_url() -> Option<String> {
    env::var("AI_ADMIN_URL").ok()
}

pub fn ai_admin_timeout() -> Duration {
    let millis = env::var("AI_ADMIN_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(2000);
    Duration::from_millis(millis)
}

/// Stable identifier for this server instance, used to mark which player
/// keys it owns (`player_key.managed_by`). Read from the file named by
/// `SERVER_ID_SOURCE` (default `/etc/machine-id`); contents are used as-is,
/// trimmed, rather than hashed, since every server on a host already gets a
/// unique machine id and there is no other hashing crate in this stack.
pub fn server_id() -> String {
    let source = env::var("SERVER_ID_SOURCE").unwrap_or_else(|_| "/etc/machine-id".to_string());
    match fs::read_to_string(&source) {
        Ok(contents) => contents.trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, source = %source, "falling back to a random server id");
            uuid::Uuid::new_v4().to_string()
        }
    }
}
