//! # SQLite Store
//!
//! Durable [`Store`] backend: one `kv_documents` table holding the three
//! JSON documents.
//!
//! ## Why a key/value table?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The persisted state is three whole documents (rules, catalog,         │
//! │  ledger log), always read and written as units. A relational schema    │
//! │  per entity would force the store to understand document internals;    │
//! │  a kv table keeps the backend interchangeable with any other           │
//! │  get/set persistence an embedder brings.                               │
//! │                                                                         │
//! │  kv_documents                                                          │
//! │  ┌──────────────────┬───────────────────────────┬─────────────────┐    │
//! │  │ key (PK)         │ value (JSON text)         │ updated_at      │    │
//! │  ├──────────────────┼───────────────────────────┼─────────────────┤    │
//! │  │ price_rules      │ {"expiry_threshold_days".. │ 2026-08-04T09:..│    │
//! │  │ catalog_items    │ [{"item_id":"milk-1",...   │ 2026-08-04T09:..│    │
//! │  │ ledger_log       │ [{"id":"550e8400-...",...  │ 2026-08-04T09:..│    │
//! │  └──────────────────┴───────────────────────────┴─────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! WAL (Write-Ahead Logging) is enabled so readers don't block the writer
//! and crash recovery is clean.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::{Store, StoreEvent, EVENT_CHANNEL_CAPACITY};

/// Maximum connections in the pool. A handful is plenty for a local
/// single-writer store.
const MAX_CONNECTIONS: u32 = 5;

/// How long to wait for a free connection before giving up.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// How long SQLite retries on a locked database before erroring.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// SqliteStore
// =============================================================================

/// Durable key/value document store on SQLite.
///
/// ## Usage
/// ```rust,ignore
/// let store = SqliteStore::open("./data/reprice.db").await?;
/// store.set(PRICE_RULES_KEY, rules_json).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    events: broadcast::Sender<StoreEvent>,
}

impl SqliteStore {
    /// Opens (creating if missing) a database file at the given path.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT);

        info!(path = %path.as_ref().display(), "Opening SQLite store");
        SqliteStore::connect(options, MAX_CONNECTIONS).await
    }

    /// Opens an isolated in-memory database (for testing).
    ///
    /// ## Note
    /// In-memory SQLite lives and dies with its connection, so the pool is
    /// capped at a single connection.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        SqliteStore::connect(options, 1).await
    }

    async fn connect(options: SqliteConnectOptions, max_connections: u32) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        // Idempotent schema bootstrap; the table carries no schema beyond
        // key/value, so there is nothing to migrate between versions.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv_documents (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(SqliteStore { pool, events })
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv_documents WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        let updated_at = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO kv_documents (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(&value)
        .bind(&updated_at)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Stored document");

        let _ = self.events.send(StoreEvent {
            key: key.to_string(),
        });

        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
