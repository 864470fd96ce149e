use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub mod memory;

pub use memory::MemoryStore;

/// Key under which the login session token lives.
pub const AUTH_KEY: &str = "music_auth";
/// Key under which the JSON-encoded lookup history lives.
pub const HISTORY_KEY: &str = "music_chat_history";

/// Named-key persistence for client state (auth marker, history).
///
/// Values are whole strings; callers replace a key's value in one step.
pub trait StateStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// SQLite-backed store, one row per key.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }

        let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(
                r#"
CREATE TABLE IF NOT EXISTS client_state (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL,
  updated_at INTEGER NOT NULL
);
"#,
            )
            .context("init schema")?;
        Ok(())
    }
}

impl StateStore for SqliteStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM client_state WHERE key=?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("read state {key}"))
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        self.conn
            .execute(
                r#"
INSERT INTO client_state(key, value, updated_at)
VALUES(?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET
  value=excluded.value,
  updated_at=excluded.updated_at
"#,
                params![key, value, now],
            )
            .with_context(|| format!("write state {key}"))?;
        tracing::debug!(key, bytes = value.len(), "state saved");
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.conn
            .execute("DELETE FROM client_state WHERE key=?1", params![key])
            .with_context(|| format!("delete state {key}"))?;
        Ok(())
    }
}
