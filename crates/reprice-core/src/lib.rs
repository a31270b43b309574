//! # reprice-core: Pure Business Logic for Reprice
//!
//! This crate is the **heart** of the Reprice engine. It contains all pricing
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Reprice Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    External UI / Collaborators                  │   │
//! │  │    Catalog sync ──► Rule editor ──► Price table ──► Ledger view │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 reprice-engine (PricingService)                 │   │
//! │  │    sync_catalog, save_rules, apply_rules_to_all, manual edit    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ reprice-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ discount  │  │ reconcile │  │   │
//! │  │   │ PriceItem │  │   Money   │  │ calculator│  │ price <-> │  │   │
//! │  │   │LedgerEntry│  │  (cents)  │  │  (rules)  │  │ discount  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 reprice-store (Storage Layer)                   │   │
//! │  │        Store trait, SQLite kv documents, ledger log             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PriceItem, LedgerEntry, CategoryScope, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`rules`] - Discount rule configuration and validation
//! - [`discount`] - The expiry/quantity discount calculator
//! - [`reconcile`] - Turns discounts (or manual prices) into consistent
//!   item state plus an audit entry
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use reprice_core::rules::PriceRuleConfig;
//! use reprice_core::types::PriceItem;
//! use reprice_core::discount::compute_discount;
//!
//! let rules = PriceRuleConfig::default(); // expiry 30d, max 75%, qty 50, step 5%
//!
//! let item = PriceItem {
//!     item_id: "milk-1".to_string(),
//!     name: "Fresh Milk".to_string(),
//!     category: "Dairy".to_string(),
//!     original_price_cents: 399,
//!     current_price_cents: 399,
//!     suggested_discount_pct: 0,
//!     quantity: 100,
//!     days_until_expiry: -256, // long expired
//! };
//!
//! // Heavily expired + overstocked: the raw score blows past the cap
//! assert_eq!(compute_discount(&item, &rules), 75);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod money;
pub mod reconcile;
pub mod rules;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use reprice_core::Money` instead of
// `use reprice_core::money::Money`

pub use error::ConfigError;
pub use money::Money;
pub use rules::PriceRuleConfig;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Actor recorded on ledger entries when the auth collaborator supplies none.
///
/// ## Why a constant?
/// Every entry must stay attributable and searchable. An empty actor string
/// would silently drop entries from actor-filtered ledger queries, so the
/// fallback is an explicit, greppable identity.
pub const UNKNOWN_ACTOR: &str = "Unknown User";

/// Items expiring within this many days are in the critical band.
pub const CRITICAL_EXPIRY_DAYS: i32 = 7;

/// Items expiring within this many days (but not critical) are near expiry.
pub const NEAR_EXPIRY_DAYS: i32 = 14;

/// Items expiring within this many days (but not near) are approaching expiry.
pub const APPROACHING_EXPIRY_DAYS: i32 = 21;

/// Extra discount for the critical expiry band (percent).
pub const CRITICAL_EXPIRY_BONUS_PCT: u32 = 30;

/// Extra discount for the near expiry band (percent).
pub const NEAR_EXPIRY_BONUS_PCT: u32 = 20;

/// Extra discount for the approaching expiry band (percent).
pub const APPROACHING_EXPIRY_BONUS_PCT: u32 = 10;
