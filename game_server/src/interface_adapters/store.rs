// Postgres-backed implementation of `StoreAdapter`. All writes go through the
// stored procedures in migrations/0002_procedures.sql so the write and its
// NOTIFY commit atomically. LISTEN requires a connection dedicated for the
// lifetime of the subscription, so this adapter keeps a `PgPool` for
// request/response queries separate from the `PgListener` used for the
// notification stream.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgListener};
use tokio::sync::{Mutex, mpsc};

use crate::domain::entities::{ChatRow, PlayerKeyRow};
use crate::domain::errors::StoreError;
use crate::domain::ports::{JoinOutcome, StoreAdapter, UpdateKind};

fn color_from_str(s: &str) -> go_engine::Color {
    match s {
        "white" => go_engine::Color::White,
        _ => go_engine::Color::Black,
    }
}

fn color_to_str(c: go_engine::Color) -> &'static str {
    match c {
        go_engine::Color::White => "white",
        go_engine::Color::Black => "black",
    }
}

pub struct PgStoreAdapter {
    pool: PgPool,
    listener: Mutex<PgListener>,
}

impl PgStoreAdapter {
    pub async fn new(pool: PgPool) -> Result<Self, StoreError> {
        let listener = PgListener::connect_with(&pool).await?;
        Ok(Self {
            pool,
            listener: Mutex::new(listener),
        })
    }

    /// Spawn the task that turns raw Postgres notifications into
    /// `(UpdateKind, key, payload)` tuples on `tx`. Runs until the pool is
    /// dropped; a dropped listener connection is reconnected automatically by
    /// `PgListener::recv`'s internal retry. `bound_keys` is polled once after
    /// such a reconnect to rebuild every `LISTEN` the server had open, since
    /// `PgListener` does not remember subscriptions across a fresh backend
    /// connection. `server_id` is re-run through cleanup at the same point:
    /// we cannot tell whether the outage also lost writes to `managed_by`, so
    /// treat it like a restart and let ownership be reclaimed from scratch.
    pub async fn run_notification_loop<F, Fut>(
        &self,
        tx: mpsc::UnboundedSender<(UpdateKind, String, Option<String>)>,
        server_id: std::sync::Arc<str>,
        bound_keys: F,
    ) where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Vec<String>> + Send,
    {
        let mut recovering = false;
        loop {
            let notification = {
                let mut listener = self.listener.lock().await;
                listener.recv().await
            };
            match notification {
                Ok(note) => {
                    if recovering {
                        recovering = false;
                        if let Err(e) = self.cleanup(&server_id).await {
                            tracing::error!(error = %e, "cleanup after listener reconnect failed");
                        }
                        let keys = bound_keys().await;
                        for key in &keys {
                            if let Err(e) = self.subscribe(key).await {
                                tracing::error!(error = %e, key, "failed to resubscribe after reconnect");
                            }
                        }
                        tracing::info!(resubscribed = keys.len(), "listener recovered from disconnect");
                    }

                    let channel = note.channel();
                    let payload = note.payload();
                    if let Some((kind, key)) = parse_channel(channel) {
                        let payload = (!payload.is_empty()).then(|| payload.to_string());
                        if tx.send((kind, key, payload)).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    recovering = true;
                    tracing::error!(error = %e, "listener connection lost, retrying");
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}

fn parse_channel(channel: &str) -> Option<(UpdateKind, String)> {
    for (prefix, kind) in [
        ("game_status_", UpdateKind::GameStatus),
        ("chat_", UpdateKind::Chat),
        ("opponent_connected_", UpdateKind::OpponentConnected),
    ] {
        if let Some(key) = channel.strip_prefix(prefix) {
            return Some((kind, key.to_string()));
        }
    }
    None
}

#[async_trait]
impl StoreAdapter for PgStoreAdapter {
    async fn cleanup(&self, server_id: &str) -> Result<(), StoreError> {
        sqlx::query("SELECT sp_do_cleanup($1)")
            .bind(server_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn new_game(
        &self,
        blob: Vec<u8>,
        key_w: &str,
        key_b: &str,
        requested_color: go_engine::Color,
        ai_secret: Option<&str>,
        server_id: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("SELECT sp_new_game($1, $2, $3, $4, $5, $6)")
            .bind(blob)
            .bind(key_w)
            .bind(key_b)
            .bind(color_to_str(requested_color))
            .bind(ai_secret)
            .bind(server_id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::KeyConflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn join_game(&self, key: &str, server_id: &str) -> Result<JoinOutcome, StoreError> {
        let row = sqlx::query("SELECT * FROM sp_join_game($1, $2)")
            .bind(key)
            .bind(server_id)
            .fetch_one(&self.pool)
            .await?;

        let found: bool = row.try_get("found")?;
        if !found {
            return Ok(JoinOutcome::Dne);
        }
        let in_use: bool = row.try_get("in_use")?;
        if in_use {
            return Ok(JoinOutcome::InUse);
        }

        Ok(JoinOutcome::Success {
            key_w: row.try_get("key_w")?,
            key_b: row.try_get("key_b")?,
        })
    }

    async fn write_game(&self, key: &str, blob: Vec<u8>, new_version: i64) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT sp_write_game($1, $2, $3) AS ok")
            .bind(key)
            .bind(blob)
            .bind(new_version)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("ok")?)
    }

    async fn write_chat(&self, key: &str, timestamp: f64, text: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT sp_write_chat($1, $2, $3) AS ok")
            .bind(key)
            .bind(timestamp)
            .bind(text)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("ok")?)
    }

    async fn trigger_update_all(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("SELECT sp_trigger_update_all($1)")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn unsubscribe(&self, key: &str, server_id: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT sp_unsubscribe($1, $2) AS ok")
            .bind(key)
            .bind(server_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("ok")?)
    }

    async fn subscribe(&self, key: &str) -> Result<(), StoreError> {
        let channels = [
            format!("game_status_{key}"),
            format!("chat_{key}"),
            format!("opponent_connected_{key}"),
        ];
        let mut listener = self.listener.lock().await;
        listener
            .listen_all(channels.iter().map(String::as_str))
            .await?;
        Ok(())
    }

    async fn unlisten(&self, key: &str) -> Result<(), StoreError> {
        let mut listener = self.listener.lock().await;
        listener.unlisten(&format!("game_status_{key}")).await?;
        listener.unlisten(&format!("chat_{key}")).await?;
        listener
            .unlisten(&format!("opponent_connected_{key}"))
            .await?;
        Ok(())
    }

    async fn fetch_game(&self, key: &str) -> Result<(Vec<u8>, i64), StoreError> {
        let row = sqlx::query(
            "SELECT g.data, g.version FROM game g JOIN player_key pk ON pk.game_id = g.id WHERE pk.key = $1",
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await?;
        Ok((row.try_get("data")?, row.try_get("version")?))
    }

    async fn fetch_chat_since(&self, key: &str, after_id: i64) -> Result<Vec<ChatRow>, StoreError> {
        let rows = sqlx::query(
            "SELECT c.id, c.color, c.timestamp, c.text \
             FROM chat c JOIN player_key pk ON pk.game_id = c.game_id \
             WHERE pk.key = $1 AND c.id > $2 ORDER BY c.id ASC",
        )
        .bind(key)
        .bind(after_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let color_str: String = row.try_get("color")?;
                Ok(ChatRow {
                    id: row.try_get("id")?,
                    color: color_from_str(&color_str),
                    timestamp: row.try_get("timestamp")?,
                    text: row.try_get("text")?,
                })
            })
            .collect()
    }

    async fn fetch_opponent_connected(&self, key: &str) -> Result<bool, StoreError> {
        let row = sqlx::query(
            "SELECT opp.connected AS connected \
             FROM player_key pk JOIN player_key opp ON opp.key = pk.opponent_key \
             WHERE pk.key = $1",
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("connected")?)
    }

    async fn fetch_player_key(&self, key: &str) -> Result<Option<PlayerKeyRow>, StoreError> {
        let row = sqlx::query(
            "SELECT key, game_id, color, opponent_key, connected, managed_by, ai_secret \
             FROM player_key WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            let color_str: String = row.try_get("color")?;
            Ok(PlayerKeyRow {
                key: row.try_get("key")?,
                game_id: row.try_get("game_id")?,
                color: color_from_str(&color_str),
                opponent_key: row.try_get("opponent_key")?,
                connected: row.try_get("connected")?,
                managed_by: row.try_get("managed_by")?,
                ai_secret: row.try_get("ai_secret")?,
            })
        })
        .transpose()
    }
}
