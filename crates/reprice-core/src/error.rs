//! # Error Types
//!
//! Domain-specific error types for reprice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  reprice-core errors (this file)                                       │
//! │  └── ConfigError       - Rule configuration rejected before use        │
//! │                                                                         │
//! │  reprice-store errors (separate crate)                                 │
//! │  └── StoreError        - Persistence / serialization failures          │
//! │                                                                         │
//! │  reprice-engine errors (separate crate)                                │
//! │  └── EngineError       - What the embedding UI sees                    │
//! │                                                                         │
//! │  Flow: ConfigError ──┐                                                  │
//! │        StoreError  ──┴──► EngineError ──► UI                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, bounds)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Config Error
// =============================================================================

/// Rule configuration errors.
///
/// Raised by `PriceRuleConfig::validate` before any mutation is applied:
/// a rejected ruleset leaves the prior rules, catalog, and ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A threshold that the calculator divides by was zero.
    ///
    /// ## When This Occurs
    /// - `expiry_threshold_days == 0` (the base-ramp divisor)
    /// - `quantity_threshold == 0` (the tier divisor)
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A percentage field left the 0-100 range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u32, max: u32 },
}

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::MustBePositive {
            field: "expiry_threshold_days".to_string(),
        };
        assert_eq!(err.to_string(), "expiry_threshold_days must be positive");

        let err = ConfigError::OutOfRange {
            field: "max_discount_pct".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "max_discount_pct must be between 0 and 100");
    }
}
