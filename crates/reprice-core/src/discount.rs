//! # Discount Calculator
//!
//! Maps item state + ruleset to a suggested percentage markdown.
//!
//! ## The Scoring Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   compute_discount(item, rules)                         │
//! │                                                                         │
//! │  category out of scope? ──► 0                                          │
//! │  days_until_expiry > threshold? ──► 0                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  base ramp: round(100 × (threshold - days) / threshold)                │
//! │    0% at the threshold, ~100% at zero days, >100% once expired         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  + urgency bonus (first matching band only):                           │
//! │      days ≤ 7 → +30   days ≤ 14 → +20   days ≤ 21 → +10               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  + quantity bonus: qty > threshold → +step                             │
//! │  + tier bonus: floor(qty / threshold) × step/2                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  clamp to [0, max_discount_pct], round to whole percent                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Basis Points Internally?
//! The tier bonus adds half-steps (step/2), so an odd step contributes
//! fractions of a percent. Accumulating in basis points (1% = 100 bps)
//! keeps those halves exact and defers rounding to the single final step.
//!
//! ## Known Quirk: Quantity Double-Count
//! Any quantity at or above the threshold earns BOTH the threshold bonus
//! and at least one tier bonus, so the step is partially applied twice.
//! This matches the long-observed production behavior and is pinned by
//! test below; do not "fix" it without a product decision.

use crate::rules::PriceRuleConfig;
use crate::types::PriceItem;
use crate::{
    APPROACHING_EXPIRY_BONUS_PCT, APPROACHING_EXPIRY_DAYS, CRITICAL_EXPIRY_BONUS_PCT,
    CRITICAL_EXPIRY_DAYS, NEAR_EXPIRY_BONUS_PCT, NEAR_EXPIRY_DAYS,
};

// =============================================================================
// Calculator
// =============================================================================

/// Computes the suggested discount for one item, in whole percent.
///
/// Deterministic and pure: no storage access, no clock, no side effects.
/// The result is always within `0..=rules.max_discount_pct`.
///
/// ## Preconditions
/// `rules` must have passed [`PriceRuleConfig::validate`]: both
/// `expiry_threshold_days` and `quantity_threshold` are divisors here.
///
/// ## Example
/// ```rust
/// use reprice_core::discount::compute_discount;
/// use reprice_core::rules::PriceRuleConfig;
/// use reprice_core::types::PriceItem;
///
/// let rules = PriceRuleConfig::default();
/// let item = PriceItem {
///     item_id: "bread-1".to_string(),
///     name: "White Bread".to_string(),
///     category: "Bakery".to_string(),
///     original_price_cents: 249,
///     current_price_cents: 249,
///     suggested_discount_pct: 0,
///     quantity: 10,
///     days_until_expiry: 45, // beyond the 30-day horizon
/// };
/// assert_eq!(compute_discount(&item, &rules), 0);
/// ```
pub fn compute_discount(item: &PriceItem, rules: &PriceRuleConfig) -> u32 {
    // Out of category scope: the ruleset simply does not speak to this item.
    if !rules.category_scope.includes(&item.category) {
        return 0;
    }

    let threshold = i64::from(rules.expiry_threshold_days);
    let days = i64::from(item.days_until_expiry);

    // Not yet near expiry: no discount.
    if days > threshold {
        return 0;
    }

    // Linear ramp from 0% at the threshold to ~100% at zero days remaining,
    // rounded to a whole percent. Expired items (negative days) push the
    // ratio above 1; that overshoot is deliberate and capped at the end.
    let base_pct = ((threshold - days) * 100 + threshold / 2) / threshold;

    let mut score_bps = base_pct * 100;

    // Urgency bonus: first matching band only, not cumulative.
    score_bps += i64::from(urgency_bonus_pct(item.days_until_expiry)) * 100;

    // Quantity bonus at the threshold crossing.
    if item.quantity > rules.quantity_threshold {
        score_bps += i64::from(rules.discount_step_pct) * 100;
    }

    // Tier bonus: every full multiple of the threshold adds a half-step.
    // Overlaps with the crossing bonus above; see the module quirk note.
    let tiers = i64::from(item.quantity / rules.quantity_threshold);
    score_bps += tiers * i64::from(rules.discount_step_pct) * 50;

    let max_bps = i64::from(rules.max_discount_pct) * 100;
    let clamped = score_bps.clamp(0, max_bps);

    // Single rounding step back to whole percent.
    ((clamped + 50) / 100) as u32
}

/// Urgency bonus for the expiry horizon, in percent.
///
/// Bands are evaluated top-down and only the first match applies; an item
/// 3 days from expiry gets +30, not +60.
fn urgency_bonus_pct(days_until_expiry: i32) -> u32 {
    if days_until_expiry <= CRITICAL_EXPIRY_DAYS {
        CRITICAL_EXPIRY_BONUS_PCT
    } else if days_until_expiry <= NEAR_EXPIRY_DAYS {
        NEAR_EXPIRY_BONUS_PCT
    } else if days_until_expiry <= APPROACHING_EXPIRY_DAYS {
        APPROACHING_EXPIRY_BONUS_PCT
    } else {
        0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryScope;

    fn rules() -> PriceRuleConfig {
        // expiry 30, max 75, qty 50, step 5 (the shipped defaults)
        PriceRuleConfig::default()
    }

    fn item(days_until_expiry: i32, quantity: u32) -> PriceItem {
        PriceItem {
            item_id: "milk-1".to_string(),
            name: "Fresh Milk".to_string(),
            category: "Dairy".to_string(),
            original_price_cents: 399,
            current_price_cents: 399,
            suggested_discount_pct: 0,
            quantity,
            days_until_expiry,
        }
    }

    #[test]
    fn beyond_expiry_threshold_yields_zero() {
        assert_eq!(compute_discount(&item(45, 100), &rules()), 0);
        assert_eq!(compute_discount(&item(31, 100), &rules()), 0);
    }

    #[test]
    fn at_threshold_scores_urgency_and_quantity_only() {
        // days == threshold: ramp is 0, bands don't reach 30 days,
        // quantity 100 > 50 adds 5, tiers add 2 × 2.5
        assert_eq!(compute_discount(&item(30, 100), &rules()), 10);
    }

    #[test]
    fn out_of_scope_category_yields_zero() {
        let mut scoped = rules();
        scoped.category_scope = CategoryScope::Only("Bakery".to_string());
        assert_eq!(compute_discount(&item(-256, 100), &scoped), 0);

        // The named category still scores normally
        let mut bakery = item(-256, 100);
        bakery.category = "Bakery".to_string();
        assert_eq!(compute_discount(&bakery, &scoped), 75);
    }

    #[test]
    fn long_expired_overstock_clamps_to_max() {
        // ramp alone is round(286/30 × 100) = 953%, far past the cap
        assert_eq!(compute_discount(&item(-256, 100), &rules()), 75);
    }

    #[test]
    fn result_never_exceeds_max_discount() {
        let r = rules();
        for days in [-300, -30, -1, 0, 1, 7, 8, 14, 15, 21, 22, 29, 30, 31, 60] {
            for qty in [0u32, 1, 49, 50, 51, 100, 1000] {
                let pct = compute_discount(&item(days, qty), &r);
                assert!(pct <= r.max_discount_pct, "days={days} qty={qty} pct={pct}");
            }
        }
    }

    #[test]
    fn urgency_bands_are_exclusive() {
        // qty 0 so only ramp + band contribute
        // days=7:  ramp round(23/30×100)=77, +30 → 107 → capped at 100
        let mut wide = rules();
        wide.max_discount_pct = 100;
        assert_eq!(compute_discount(&item(7, 0), &wide), 100);

        // days=8:  ramp round(22/30×100)=73, +20 → 93
        assert_eq!(compute_discount(&item(8, 0), &wide), 93);

        // days=15: ramp round(15/30×100)=50, +10 → 60
        assert_eq!(compute_discount(&item(15, 0), &wide), 60);

        // days=22: ramp round(8/30×100)=27, no band → 27
        assert_eq!(compute_discount(&item(22, 0), &wide), 27);
    }

    #[test]
    fn quantity_bonus_double_counts_at_threshold_multiples() {
        // Pins the observed production numbers for the threshold/tier
        // overlap; a deliberate parity test, not an endorsement.
        let mut wide = rules();
        wide.max_discount_pct = 100;

        // days=10: ramp round(20/30×100)=67, band ≤14 → +20 = 87
        // qty=60:  crossing +5, one tier +2.5 → 94.5 → rounds to 95
        assert_eq!(compute_discount(&item(10, 60), &wide), 95);

        // qty=49 (below threshold, zero tiers): 87
        assert_eq!(compute_discount(&item(10, 49), &wide), 87);

        // qty=50 (at threshold): no crossing bonus, one tier +2.5 → 89.5 → 90
        assert_eq!(compute_discount(&item(10, 50), &wide), 90);
    }

    #[test]
    fn zero_quantity_earns_no_quantity_terms() {
        let mut wide = rules();
        wide.max_discount_pct = 100;

        // days=25: ramp round(5/30×100)=17, no band, qty 0 → 17
        assert_eq!(compute_discount(&item(25, 0), &wide), 17);
    }
}
