//! # Rule Configuration
//!
//! The single active ruleset controlling discount computation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Types                                                        │
//! │  ├── Percentages and thresholds are unsigned (no negatives possible)   │
//! │  └── Category scope is a closed enum                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - validate() before any save                     │
//! │  ├── expiry_threshold_days > 0  (base-ramp divisor)                    │
//! │  ├── quantity_threshold > 0     (tier divisor)                         │
//! │  └── max_discount_pct <= 100                                           │
//! │                                                                         │
//! │  The calculator assumes a validated config and never re-checks;        │
//! │  division-by-zero is impossible once validate() has passed.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ConfigError, ConfigResult};
use crate::types::CategoryScope;

// =============================================================================
// Price Rule Config
// =============================================================================

/// The active discount ruleset.
///
/// Mutated only by an explicit rule-save operation; each save is itself a
/// ledger-worthy event recording the old and new configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRuleConfig {
    /// Items further than this many days from expiry get 0% discount.
    /// Must be positive (it divides the base ramp).
    pub expiry_threshold_days: u32,

    /// Hard ceiling on any computed discount (0-100). Bounds every value
    /// the calculator can ever return, regardless of other terms.
    pub max_discount_pct: u32,

    /// Quantities above this add an extra discount step.
    /// Must be positive (it divides the quantity tiers).
    pub quantity_threshold: u32,

    /// Increment applied at the quantity-threshold crossing and, halved,
    /// per full quantity tier.
    pub discount_step_pct: u32,

    /// Which categories the ruleset applies to.
    pub category_scope: CategoryScope,
}

impl PriceRuleConfig {
    /// Checks the ruleset against the invariants the calculator relies on.
    ///
    /// Called by the service before any rule save; a failed validation is
    /// rejected atomically with no partial update and no ledger entry.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.expiry_threshold_days == 0 {
            return Err(ConfigError::MustBePositive {
                field: "expiry_threshold_days".to_string(),
            });
        }

        if self.quantity_threshold == 0 {
            return Err(ConfigError::MustBePositive {
                field: "quantity_threshold".to_string(),
            });
        }

        if self.max_discount_pct > 100 {
            return Err(ConfigError::OutOfRange {
                field: "max_discount_pct".to_string(),
                min: 0,
                max: 100,
            });
        }

        Ok(())
    }
}

impl Default for PriceRuleConfig {
    /// The ruleset shipped before any save: 30-day horizon, 75% cap,
    /// quantity threshold 50, 5% step, all categories.
    fn default() -> Self {
        PriceRuleConfig {
            expiry_threshold_days: 30,
            max_discount_pct: 75,
            quantity_threshold: 50,
            discount_step_pct: 5,
            category_scope: CategoryScope::All,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ruleset() {
        let rules = PriceRuleConfig::default();
        assert_eq!(rules.expiry_threshold_days, 30);
        assert_eq!(rules.max_discount_pct, 75);
        assert_eq!(rules.quantity_threshold, 50);
        assert_eq!(rules.discount_step_pct, 5);
        assert_eq!(rules.category_scope, CategoryScope::All);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_zero_expiry_threshold_rejected() {
        let rules = PriceRuleConfig {
            expiry_threshold_days: 0,
            ..PriceRuleConfig::default()
        };
        assert_eq!(
            rules.validate(),
            Err(ConfigError::MustBePositive {
                field: "expiry_threshold_days".to_string()
            })
        );
    }

    #[test]
    fn test_zero_quantity_threshold_rejected() {
        let rules = PriceRuleConfig {
            quantity_threshold: 0,
            ..PriceRuleConfig::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_max_discount_over_100_rejected() {
        let rules = PriceRuleConfig {
            max_discount_pct: 101,
            ..PriceRuleConfig::default()
        };
        assert_eq!(
            rules.validate(),
            Err(ConfigError::OutOfRange {
                field: "max_discount_pct".to_string(),
                min: 0,
                max: 100,
            })
        );
    }

    #[test]
    fn test_boundary_values_accepted() {
        // 100% cap and 0% step are both legal
        let rules = PriceRuleConfig {
            max_discount_pct: 100,
            discount_step_pct: 0,
            ..PriceRuleConfig::default()
        };
        assert!(rules.validate().is_ok());
    }
}
