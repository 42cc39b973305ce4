// In-memory `StoreAdapter` test double. Grounded on
// `auth_server::use_cases::test_support::RecordingStore` (a `Mutex`-guarded
// `HashMap` standing in for Postgres, with a `FailureFlags` knob for
// exercising error paths). `subscribe`/`unlisten`/notification delivery are
// no-ops here: tests that need to observe a push drive it directly through
// `SessionManager::dispatch_update`, exactly as the real notification loop
// would, without requiring a live `LISTEN`/`NOTIFY` connection.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::entities::{ChatRow, PlayerKeyRow};
use crate::domain::errors::StoreError;
use crate::domain::ports::{JoinOutcome, StoreAdapter};

struct GameRow {
    blob: Vec<u8>,
    version: i64,
}

#[derive(Default)]
struct Inner {
    next_game_id: i64,
    games: HashMap<i64, GameRow>,
    keys: HashMap<String, PlayerKeyRow>,
    chat: HashMap<i64, Vec<ChatRow>>,
    next_chat_id: i64,
}

#[derive(Clone, Copy, Default)]
pub struct FailureFlags {
    pub write_game: bool,
    pub join_game: bool,
}

/// A fake, process-local "database" shared by however many `FakeStore`
/// handles point at it, so tests can simulate two servers racing over the
/// same rows the way two real `PgStoreAdapter`s would via Postgres.
pub struct FakeStore {
    inner: Mutex<Inner>,
    failures: FailureFlags,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            failures: FailureFlags::default(),
        }
    }

    pub fn with_failures(failures: FailureFlags) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            failures,
        }
    }

    pub fn version_of(&self, key: &str) -> i64 {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let row = inner.keys.get(key).expect("key exists");
        inner.games.get(&row.game_id).expect("game exists").version
    }

    pub fn managed_by(&self, key: &str) -> Option<String> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        inner.keys.get(key).and_then(|r| r.managed_by.clone())
    }
}

#[async_trait]
impl StoreAdapter for FakeStore {
    async fn cleanup(&self, server_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        for row in inner.keys.values_mut() {
            if row.managed_by.as_deref() == Some(server_id) {
                row.managed_by = None;
                row.connected = false;
            }
        }
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
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if inner.keys.contains_key(key_w) || inner.keys.contains_key(key_b) {
            return Err(StoreError::KeyConflict);
        }

        let game_id = inner.next_game_id;
        inner.next_game_id += 1;
        inner.games.insert(game_id, GameRow { blob, version: 0 });

        let white_requested = requested_color == go_engine::Color::White;
        inner.keys.insert(
            key_w.to_string(),
            PlayerKeyRow {
                key: key_w.to_string(),
                game_id,
                color: go_engine::Color::White,
                opponent_key: key_b.to_string(),
                connected: white_requested,
                managed_by: white_requested.then(|| server_id.to_string()),
                ai_secret: (!white_requested).then(|| ai_secret.map(str::to_string)).flatten(),
            },
        );
        inner.keys.insert(
            key_b.to_string(),
            PlayerKeyRow {
                key: key_b.to_string(),
                game_id,
                color: go_engine::Color::Black,
                opponent_key: key_w.to_string(),
                connected: !white_requested,
                managed_by: (!white_requested).then(|| server_id.to_string()),
                ai_secret: white_requested.then(|| ai_secret.map(str::to_string)).flatten(),
            },
        );
        Ok(())
    }

    async fn join_game(&self, key: &str, server_id: &str) -> Result<JoinOutcome, StoreError> {
        if self.failures.join_game {
            return Err(StoreError::Transient("simulated failure".into()));
        }
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let Some(row) = inner.keys.get(key).cloned() else {
            return Ok(JoinOutcome::Dne);
        };
        if row.managed_by.is_some() {
            return Ok(JoinOutcome::InUse);
        }

        let entry = inner.keys.get_mut(key).expect("checked above");
        entry.connected = true;
        entry.managed_by = Some(server_id.to_string());

        let (key_w, key_b) = match row.color {
            go_engine::Color::White => (row.key.clone(), row.opponent_key.clone()),
            go_engine::Color::Black => (row.opponent_key.clone(), row.key.clone()),
        };
        Ok(JoinOutcome::Success { key_w, key_b })
    }

    async fn write_game(&self, key: &str, blob: Vec<u8>, new_version: i64) -> Result<bool, StoreError> {
        if self.failures.write_game {
            return Err(StoreError::Transient("simulated failure".into()));
        }
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let Some(row) = inner.keys.get(key) else {
            return Ok(false);
        };
        let game_id = row.game_id;
        let game = inner.games.get_mut(&game_id).expect("game exists");
        if game.version < new_version {
            game.blob = blob;
            game.version = new_version;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn write_chat(&self, key: &str, timestamp: f64, text: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let Some(row) = inner.keys.get(key).cloned() else {
            return Ok(false);
        };
        let id = inner.next_chat_id;
        inner.next_chat_id += 1;
        inner.chat.entry(row.game_id).or_default().push(ChatRow {
            id,
            color: row.color,
            timestamp,
            text: text.to_string(),
        });
        Ok(true)
    }

    async fn trigger_update_all(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn unsubscribe(&self, key: &str, server_id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let Some(row) = inner.keys.get_mut(key) else {
            return Ok(false);
        };
        if row.managed_by.as_deref() != Some(server_id) {
            return Ok(false);
        }
        row.managed_by = None;
        row.connected = false;
        Ok(true)
    }

    async fn subscribe(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn unlisten(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn fetch_game(&self, key: &str) -> Result<(Vec<u8>, i64), StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let row = inner.keys.get(key).ok_or_else(|| StoreError::Transient("unknown key".into()))?;
        let game = inner.games.get(&row.game_id).expect("game exists");
        Ok((game.blob.clone(), game.version))
    }

    async fn fetch_chat_since(&self, key: &str, after_id: i64) -> Result<Vec<ChatRow>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let Some(row) = inner.keys.get(key) else {
            return Ok(Vec::new());
        };
        Ok(inner
            .chat
            .get(&row.game_id)
            .map(|rows| rows.iter().filter(|r| r.id > after_id).cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch_opponent_connected(&self, key: &str) -> Result<bool, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let row = inner.keys.get(key).ok_or_else(|| StoreError::Transient("unknown key".into()))?;
        Ok(inner
            .keys
            .get(&row.opponent_key)
            .map(|opp| opp.connected)
            .unwrap_or(false))
    }

    async fn fetch_player_key(&self, key: &str) -> Result<Option<PlayerKeyRow>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.keys.get(key).cloned())
    }
}
