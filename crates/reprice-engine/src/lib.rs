//! # reprice-engine: Pricing Service for Reprice
//!
//! Orchestrates the pure pricing core over the shared document store.
//! This is the only crate the embedding UI talks to.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PricingService                                   │
//! │                                                                         │
//! │  UI ──► apply_rules_to_all(actor)                                      │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  for each item: compute_discount ──► apply_discount ──► entry?         │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  save catalog ──► append entries + bulk summary as ONE batch           │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  StoreEvent published ──► ledger viewer re-fetches                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reprice_engine::PricingService;
//! use reprice_store::SqliteStore;
//!
//! let store = Arc::new(SqliteStore::open("./data/reprice.db").await?);
//! let service = PricingService::new(store);
//!
//! service.sync_catalog(items, Some("alice")).await?;
//! let repriced = service.apply_rules_to_all(Some("alice")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{EngineError, EngineResult};
pub use service::PricingService;
