//! # Store Interface
//!
//! The injected persistence seam: three JSON documents behind an
//! object-safe async trait, plus a broadcast channel for change fanout.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  This trait defines WHAT a store does. Backends define HOW:            │
//! │                                                                         │
//! │    MemoryStore  - in-process HashMap (tests, external persistence)     │
//! │    SqliteStore  - durable kv documents (the reference backend)         │
//! │                                                                         │
//! │  Consumers receive `Arc<dyn Store>` so any backend can be injected;    │
//! │  there are no ambient/global singletons anywhere in the workspace.     │
//! │                                                                         │
//! │  subscribe() is the cross-context "storage changed" channel: a write   │
//! │  in one context publishes a StoreEvent that readers in another use as  │
//! │  a cue to re-fetch. Events carry the key only, never the value -       │
//! │  a notified reader must go back to the store for current state.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::StoreResult;

// =============================================================================
// Document Keys
// =============================================================================

/// Key of the single `PriceRuleConfig` document.
pub const PRICE_RULES_KEY: &str = "price_rules";

/// Key of the `PriceItem` array document.
pub const CATALOG_ITEMS_KEY: &str = "catalog_items";

/// Key of the `LedgerEntry` array document (most-recent-first).
pub const LEDGER_LOG_KEY: &str = "ledger_log";

/// Capacity of the change-notification channel. Slow subscribers that fall
/// further behind than this see a `Lagged` error and should re-fetch.
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// Store Event
// =============================================================================

/// Published after every successful write.
///
/// Carries the changed key only; subscribers re-read the document rather
/// than trusting any cached copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    /// The document key that changed.
    pub key: String,
}

// =============================================================================
// Store Trait
// =============================================================================

/// Shared persisted state: string keys mapping to JSON document strings.
///
/// There is exactly one writer role per logical session; the trait offers
/// no locking protocol because at most one write is in flight per store
/// instance. Cross-context visibility goes through [`Store::subscribe`].
#[async_trait]
pub trait Store: Send + Sync {
    /// Reads a document. `Ok(None)` means the key was never written.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a document and publishes a [`StoreEvent`] for the key.
    async fn set(&self, key: &str, value: String) -> StoreResult<()>;

    /// Subscribes to change notifications for all keys.
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}
