//! # Ledger Store
//!
//! Append-only audit log on top of any [`Store`].
//!
//! ## Append Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      LedgerStore.append(entry)                          │
//! │                                                                         │
//! │  load ledger_log ──► prepend entry ──► serialize ──► one set()         │
//! │                                                                         │
//! │  The log is kept most-recent-first so the viewer reads history         │
//! │  top-down without sorting. Ties on identical timestamps break by       │
//! │  append order: the later append sits closer to the front.             │
//! │                                                                         │
//! │  append_batch writes a whole operation's entries in ONE set(), so a    │
//! │  concurrent reader never observes a partial batch.                     │
//! │                                                                         │
//! │  Entries are never mutated or removed. "Edits" are new entries.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::debug;

use reprice_core::types::LedgerEntry;

use crate::error::StoreResult;
use crate::store::{Store, LEDGER_LOG_KEY};

// =============================================================================
// LedgerStore
// =============================================================================

/// Append-only persisted sequence of [`LedgerEntry`].
///
/// The viewing UI calls only [`LedgerStore::query`] and [`LedgerStore::all`];
/// nothing outside this type writes the `ledger_log` document.
#[derive(Clone)]
pub struct LedgerStore {
    store: Arc<dyn Store>,
}

impl LedgerStore {
    /// Creates a ledger store over the shared document store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        LedgerStore { store }
    }

    /// Returns the full ordered log, most-recent-first.
    ///
    /// A never-written log reads as empty.
    pub async fn all(&self) -> StoreResult<Vec<LedgerEntry>> {
        match self.store.get(LEDGER_LOG_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Appends one entry at the front of the log.
    pub async fn append(&self, entry: LedgerEntry) -> StoreResult<()> {
        self.append_batch(vec![entry]).await
    }

    /// Appends a whole operation's entries as a single write.
    ///
    /// `entries` is in generation order; the last generated entry (e.g. a
    /// trailing bulk summary) lands closest to the front. An empty batch
    /// is a no-op and publishes no change event.
    pub async fn append_batch(&self, entries: Vec<LedgerEntry>) -> StoreResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let existing = self.all().await?;
        let appended = entries.len();

        let mut log = Vec::with_capacity(appended + existing.len());
        log.extend(entries.into_iter().rev());
        log.extend(existing);

        // Serialize before the write: an encoding failure leaves the
        // stored log exactly as it was.
        let raw = serde_json::to_string(&log)?;
        self.store.set(LEDGER_LOG_KEY, raw).await?;

        debug!(appended, total = log.len(), "Appended ledger entries");
        Ok(())
    }

    /// Case-insensitive substring search over actor, description, item
    /// name, and action-type label.
    ///
    /// Returns matches in store order (most-recent-first); an empty filter
    /// returns the full log.
    pub async fn query(&self, filter: &str) -> StoreResult<Vec<LedgerEntry>> {
        let entries = self.all().await?;
        Ok(entries.into_iter().filter(|e| e.matches(filter)).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use reprice_core::types::{ActionType, LedgerEntry};

    fn ledger() -> LedgerStore {
        LedgerStore::new(Arc::new(MemoryStore::new()))
    }

    fn bulk_entry(actor: &str, description: &str) -> LedgerEntry {
        LedgerEntry::bulk_price_change(actor, description.to_string(), 1)
    }

    #[tokio::test]
    async fn empty_log_reads_as_empty() {
        assert!(ledger().all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_prepends_most_recent_first() {
        let ledger = ledger();

        ledger.append(bulk_entry("alice", "first")).await.unwrap();
        ledger.append(bulk_entry("alice", "second")).await.unwrap();

        let log = ledger.all().await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].details.description, "second");
        assert_eq!(log[1].details.description, "first");
    }

    #[tokio::test]
    async fn append_preserves_existing_entries_as_suffix() {
        let ledger = ledger();

        ledger.append(bulk_entry("alice", "first")).await.unwrap();
        let before = ledger.all().await.unwrap();

        ledger.append(bulk_entry("alice", "second")).await.unwrap();
        let after = ledger.all().await.unwrap();

        // Everything visible before the append is still there, unchanged,
        // at the tail of the log.
        assert_eq!(&after[after.len() - before.len()..], &before[..]);
    }

    #[tokio::test]
    async fn batch_lands_in_one_write_with_summary_first() {
        let store = Arc::new(MemoryStore::new());
        let ledger = LedgerStore::new(store.clone());
        let mut rx = store.subscribe();

        ledger
            .append_batch(vec![
                bulk_entry("alice", "item change"),
                bulk_entry("alice", "summary"),
            ])
            .await
            .unwrap();

        let log = ledger.all().await.unwrap();
        assert_eq!(log[0].details.description, "summary");
        assert_eq!(log[1].details.description, "item change");

        // Exactly one change event for the whole batch
        assert_eq!(rx.recv().await.unwrap().key, LEDGER_LOG_KEY);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn empty_batch_is_a_silent_noop() {
        let store = Arc::new(MemoryStore::new());
        let ledger = LedgerStore::new(store.clone());
        let mut rx = store.subscribe();

        ledger.append_batch(Vec::new()).await.unwrap();

        assert!(ledger.all().await.unwrap().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn query_filters_and_empty_filter_returns_all() {
        let ledger = ledger();

        ledger.append(bulk_entry("Alice", "Synced items")).await.unwrap();
        ledger
            .append(bulk_entry("bob", "Applied new price rules"))
            .await
            .unwrap();

        // Empty filter == all()
        assert_eq!(
            ledger.query("").await.unwrap(),
            ledger.all().await.unwrap()
        );

        // Actor match, case-insensitive
        let hits = ledger.query("ALICE").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].details.description, "Synced items");

        // Action-type label matches every entry here
        assert_eq!(ledger.query("bulkprice").await.unwrap().len(), 2);

        // No match
        assert!(ledger.query("no such text").await.unwrap().is_empty());

        // Results keep store order
        let hits = ledger.query("e").await.unwrap();
        assert_eq!(hits[0].action_type, ActionType::BulkPriceChange);
        assert_eq!(hits[0].details.description, "Applied new price rules");
    }
}
