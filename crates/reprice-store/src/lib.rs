//! # reprice-store: Storage Layer for Reprice
//!
//! This crate provides persistence for the Reprice engine. All state lives
//! in three JSON documents behind an injected [`Store`] interface; the
//! engine never talks to a backend directly.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Reprice Data Flow                                │
//! │                                                                         │
//! │  PricingService (reprice-engine)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   reprice-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Store trait  │    │  LedgerStore  │    │ CatalogStore │  │   │
//! │  │   │ (store.rs)    │◄───│  (ledger.rs)  │    │ (catalog.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ get/set/      │    │ append, query │    │ items, rules │  │   │
//! │  │   │ subscribe     │    │ append_batch  │    │ load + save  │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │     ┌─────┴──────┐                                              │   │
//! │  │     ▼            ▼                                              │   │
//! │  │  MemoryStore  SqliteStore                                      │   │
//! │  │  (tests)      (durable kv documents, WAL)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Document Layout
//!
//! | key             | value                                 |
//! |-----------------|---------------------------------------|
//! | `price_rules`   | one `PriceRuleConfig` JSON object     |
//! | `catalog_items` | JSON array of `PriceItem`             |
//! | `ledger_log`    | JSON array of `LedgerEntry`, most-recent-first |
//!
//! ## Change Notification
//!
//! Every successful `set` publishes a [`StoreEvent`] on a broadcast
//! channel. Readers in other contexts subscribe and re-fetch on
//! notification rather than trusting cached state; the store never merges
//! concurrent writers (last write wins).

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::CatalogStore;
pub use error::{StoreError, StoreResult};
pub use ledger::LedgerStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{Store, StoreEvent, CATALOG_ITEMS_KEY, LEDGER_LOG_KEY, PRICE_RULES_KEY};
