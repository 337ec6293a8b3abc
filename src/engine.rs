//! # Skill Engine
//!
//! The per-session service object owning the storage port. One `SkillEngine`
//! is constructed when the app starts and passed by reference to every caller;
//! nothing in the crate touches storage through ambient state.
//!
//! The engine splits its API across the feature modules, each adding an
//! `impl SkillEngine` block:
//!
//! - session/token/profile records and bulk erase (this module)
//! - assessment log (`assessment`)
//! - trail progress tracking (`progress`)
//! - points and badges (`gamification`)
//! - trail recommendations (`recommend`)
//!
//! ## Write serialization
//!
//! The underlying store has no multi-key transactions, so every
//! read-modify-write sequence (append an assessment, upsert a progress record,
//! bump the points counter, unlock a badge) takes the engine's single write
//! lock before reading. This closes the last-write-wins race that rapid
//! double-submits would otherwise hit. Plain reads take no lock. Compound
//! operations (e.g. completing a trail) never hold the lock across steps and
//! remain best-effort sequences, not transactions.
//!
//! ## Fail-open reads
//!
//! Reads of missing or unreadable blobs return an empty default and log a
//! warning instead of surfacing an error; UI logic depends on empty-is-safe.
//! Writes always propagate failure to the caller.

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore, StorageKey};
use crate::types::Profile;

/// Current time as an ISO 8601 string, matching the persisted date format.
pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

/// Current time in milliseconds since the epoch, used for time-derived ids.
pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a persisted ISO 8601 date down to epoch milliseconds.
/// Unparsable dates sort as the epoch rather than failing.
pub(crate) fn date_millis(date: &str) -> i64 {
    chrono::DateTime::parse_from_rfc3339(date)
        .map(|d| d.timestamp_millis())
        .unwrap_or(0)
}

/// Per-session engine over the persistent key-value store.
pub struct SkillEngine {
    store: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write sequences across all storage slots.
    write_lock: Mutex<()>,
}

impl SkillEngine {
    /// Create an engine over an existing storage port.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Open an engine backed by a SQLite database at the given path.
    pub fn open(db_path: &str) -> Result<Self> {
        Ok(Self::new(Arc::new(SqliteStore::new(db_path)?)))
    }

    /// Engine over an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(Arc::new(SqliteStore::in_memory()?)))
    }

    /// Engine over a plain HashMap store, with no disk I/O at all.
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    // ========================================================================
    // Storage helpers
    // ========================================================================

    /// Lock guard serializing read-modify-write sequences. Leaf mutating
    /// operations take this; compound operations must not, or they would
    /// deadlock their own inner steps.
    pub(crate) async fn write_guard(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Raw read of a storage slot. Fails open to `None` on storage errors.
    pub(crate) async fn read_raw(&self, key: StorageKey) -> Option<String> {
        match self.store.get(key.as_str()).await {
            Ok(value) => value,
            Err(e) => {
                warn!("skilluprs: [read_raw] Failed to read {}: {}", key.as_str(), e);
                None
            }
        }
    }

    /// Raw write of a storage slot. Failures propagate.
    pub(crate) async fn write_raw(&self, key: StorageKey, value: &str) -> Result<()> {
        self.store.set(key.as_str(), value).await
    }

    /// Read a JSON list slot. Missing, unreadable or corrupted data fails
    /// open to an empty list (logged, never surfaced).
    pub(crate) async fn read_list<T: DeserializeOwned>(&self, key: StorageKey) -> Vec<T> {
        match self.read_raw(key).await {
            Some(data) => match serde_json::from_str(&data) {
                Ok(list) => list,
                Err(e) => {
                    warn!(
                        "skilluprs: [read_list] Corrupted blob at {}: {}",
                        key.as_str(),
                        e
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    /// Serialize a value and write it to a slot. Failures propagate.
    pub(crate) async fn write_json<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<()> {
        let data = serde_json::to_string(value)?;
        self.write_raw(key, &data).await
    }

    // ========================================================================
    // Token & profile
    // ========================================================================

    /// Persist the session token.
    pub async fn save_token(&self, token: &str) -> Result<()> {
        self.write_raw(StorageKey::Token, token).await
    }

    /// Current session token, if any. Fails open to `None`.
    pub async fn token(&self) -> Option<String> {
        self.read_raw(StorageKey::Token).await
    }

    /// Remove the session token.
    pub async fn clear_token(&self) -> Result<()> {
        self.store.remove(StorageKey::Token.as_str()).await
    }

    /// Persist the profile, replacing any previous value wholesale.
    pub async fn save_profile(&self, profile: &Profile) -> Result<()> {
        self.write_json(StorageKey::Profile, profile).await
    }

    /// Current profile, if any. Fails open to `None` on unreadable data.
    pub async fn profile(&self) -> Option<Profile> {
        let data = self.read_raw(StorageKey::Profile).await?;
        match serde_json::from_str(&data) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("skilluprs: [profile] Corrupted profile blob: {}", e);
                None
            }
        }
    }

    /// Remove the profile.
    pub async fn clear_profile(&self) -> Result<()> {
        self.store.remove(StorageKey::Profile.as_str()).await
    }

    /// Start a local session: generate a time-derived token and persist it
    /// together with the profile. Returns the new token.
    pub async fn login(&self, name: &str, email: &str) -> Result<String> {
        let token = format!("token_{}", now_millis());
        self.save_token(&token).await?;
        self.save_profile(&Profile {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await?;
        info!("skilluprs: [login] Session started for {}", email);
        Ok(token)
    }

    /// Erase every storage slot the app owns. Atomic only insofar as the
    /// store's remove-many primitive is; a failure mid-batch can leave
    /// partial state behind.
    pub async fn clear_all_data(&self) -> Result<()> {
        let keys: Vec<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        self.store.remove_many(&keys).await?;
        info!("skilluprs: [clear_all_data] All local data erased");
        Ok(())
    }
}
