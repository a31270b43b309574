//! # Engine Error Types
//!
//! The one error enum the embedding UI sees. Inner-layer errors convert
//! up via `#[from]`; nothing is retried automatically - callers decide
//! whether to resubmit.

use thiserror::Error;

use reprice_core::error::ConfigError;
use reprice_store::StoreError;

/// Errors surfaced by [`crate::PricingService`].
///
/// Every variant is raised before (or instead of) a state change: a
/// rejected operation leaves the prior catalog, rules, and ledger
/// completely untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A manual edit named an item absent from the catalog.
    #[error("Item not found: {0}")]
    UnknownItem(String),

    /// A rule save failed validation.
    #[error("Invalid price rules: {0}")]
    Config(#[from] ConfigError),

    /// The store failed to serialize or persist.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
