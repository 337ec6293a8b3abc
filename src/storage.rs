//! Persistent key-value store.
//!
//! Every record the app persists lives in its own namespaced slot, addressed
//! by a fixed string key and holding a single string blob (JSON for structured
//! records). The [`KeyValueStore`] trait is the storage port the rest of the
//! crate talks to; [`SqliteStore`] is the production implementation backing
//! the slots with a single SQLite table, and [`MemoryStore`] is a plain
//! in-memory implementation for tests and previews.

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use rusqlite::{params, Connection};
use tokio::sync::Mutex;

use crate::error::Result;

/// Application namespace shared by all persisted keys.
pub const STORAGE_NAMESPACE: &str = "@skillupplus";

/// The fixed set of storage slots used by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    /// Raw session token string.
    Token,
    /// Profile object.
    Profile,
    /// Append-only list of assessments.
    Assessments,
    /// List of per-trail progress records.
    TrailProgress,
    /// Running points total, encoded as a string.
    Points,
    /// List of unlocked badge ids.
    Badges,
}

impl StorageKey {
    /// All slots, in the order they are bulk-erased.
    pub const ALL: [StorageKey; 6] = [
        StorageKey::Token,
        StorageKey::Profile,
        StorageKey::Assessments,
        StorageKey::TrailProgress,
        StorageKey::Points,
        StorageKey::Badges,
    ];

    /// Full namespaced key string.
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Token => "@skillupplus:token",
            StorageKey::Profile => "@skillupplus:profile",
            StorageKey::Assessments => "@skillupplus:assessments",
            StorageKey::TrailProgress => "@skillupplus:trailProgress",
            StorageKey::Points => "@skillupplus:points",
            StorageKey::Badges => "@skillupplus:badges",
        }
    }
}

/// Storage port for namespaced string blobs.
///
/// All operations are async and fallible. Individual operations are atomic;
/// there is no multi-key transaction primitive beyond [`remove_many`], so
/// read-modify-write sequences must be serialized by the caller (the engine
/// holds a write lock for exactly this reason).
///
/// [`remove_many`]: KeyValueStore::remove_many
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, or `None` if the slot is empty.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any existing blob.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the slot for `key`. Removing an empty slot is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Remove several slots in one call. Implementations should make this
    /// atomic where the backing store allows it.
    async fn remove_many(&self, keys: &[&str]) -> Result<()>;
}

// ============================================================================
// SQLite implementation
// ============================================================================

/// SQLite-backed key-value store.
///
/// A single `kv_store` table holds every slot. The connection is guarded by an
/// async mutex, so individual operations are serialized.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path.
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        Self::new(":memory:")
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        for key in keys {
            tx.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        }
        tx.commit()?;
        debug!("skilluprs: [remove_many] Removed {} keys", keys.len());
        Ok(())
    }
}

// ============================================================================
// In-memory implementation
// ============================================================================

/// HashMap-backed store for tests and previews. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut entries = self.entries.lock().await;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}
