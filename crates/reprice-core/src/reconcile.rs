//! # Price Reconciliation
//!
//! Turns a discount suggestion (or a manual price) into a consistent
//! (price, discount) pair plus an audit entry.
//!
//! ## The Two Directions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Rule application (forward):                                           │
//! │    discount% ──► price_from_discount ──► new current price             │
//! │                                                                         │
//! │  Manual edit (reverse):                                                │
//! │    new price ──► discount_from_price ──► implied discount%             │
//! │                                                                         │
//! │  Every edit is routed through these two functions; the UI never        │
//! │  computes either value independently, so price and discount can        │
//! │  never drift apart.                                                    │
//! │                                                                         │
//! │  Both directions emit a PriceChange entry IFF the price actually       │
//! │  moved. No-op applications do not pollute the ledger.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::{LedgerEntry, PriceItem};

// =============================================================================
// Pure Conversions
// =============================================================================

/// Derives the selling price from the original price and a discount percent.
///
/// Integer-cent equivalent of `original × (1 - pct/100)` rounded to two
/// decimals: round-half-up on the cent. Discounts above 100% are treated
/// as 100% (a price never goes negative).
///
/// ## Example
/// ```rust
/// use reprice_core::money::Money;
/// use reprice_core::reconcile::price_from_discount;
///
/// // $3.99 at 75% off → $1.00 (99.75 cents rounds up)
/// assert_eq!(
///     price_from_discount(Money::from_cents(399), 75),
///     Money::from_cents(100)
/// );
/// ```
pub fn price_from_discount(original: Money, discount_pct: u32) -> Money {
    let pct = i128::from(discount_pct.min(100));
    let cents = (i128::from(original.cents()) * (100 - pct) + 50) / 100;
    Money::from_cents(cents as i64)
}

/// Derives the implied discount percent from an original and a current price.
///
/// Integer-cent equivalent of `round(100 × (original - current) / original)`,
/// clamped into 0..=100: a manual price above the original implies no
/// discount rather than a negative one, and a free item implies 100%.
///
/// ## Example
/// ```rust
/// use reprice_core::money::Money;
/// use reprice_core::reconcile::discount_from_price;
///
/// assert_eq!(
///     discount_from_price(Money::from_cents(400), Money::from_cents(200)),
///     50
/// );
/// ```
pub fn discount_from_price(original: Money, current: Money) -> u32 {
    let orig = i128::from(original.cents());
    if orig <= 0 {
        return 0;
    }

    let delta = orig - i128::from(current.cents());
    if delta <= 0 {
        return 0;
    }

    let pct = (delta * 100 + orig / 2) / orig;
    pct.clamp(0, 100) as u32
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Applies a calculator result (or any discount percent) to an item.
///
/// Returns the updated item and, when the price actually moved, a
/// `PriceChange` entry describing the transition. The suggested discount
/// on the item is refreshed either way so the display stays consistent.
pub fn apply_discount(
    item: &PriceItem,
    discount_pct: u32,
    actor: &str,
) -> (PriceItem, Option<LedgerEntry>) {
    let old_price = item.current_price();
    let new_price = price_from_discount(item.original_price(), discount_pct);

    let mut updated = item.clone();
    updated.current_price_cents = new_price.cents();
    updated.suggested_discount_pct = discount_pct;

    if new_price == old_price {
        return (updated, None);
    }

    let description = format!(
        "Price updated for {} from {} to {}",
        item.name, old_price, new_price
    );
    let entry = LedgerEntry::price_change(actor, item, old_price, new_price, description);

    (updated, Some(entry))
}

/// Applies a manual price override to an item.
///
/// The reverse direction of [`apply_discount`]: the implied discount is
/// derived from the price and stored on the item so forward display stays
/// consistent. Distinguished from automatic changes only by the entry's
/// description text, not by a separate action type.
pub fn apply_manual_price(
    item: &PriceItem,
    new_price: Money,
    actor: &str,
) -> (PriceItem, Option<LedgerEntry>) {
    let old_price = item.current_price();
    let implied_pct = discount_from_price(item.original_price(), new_price);

    let mut updated = item.clone();
    updated.current_price_cents = new_price.cents();
    updated.suggested_discount_pct = implied_pct;

    if new_price == old_price {
        return (updated, None);
    }

    let description = format!(
        "Manual price update for {} ({}% discount applied)",
        item.name, implied_pct
    );
    let entry = LedgerEntry::price_change(actor, item, old_price, new_price, description);

    (updated, Some(entry))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(original_cents: i64, current_cents: i64) -> PriceItem {
        PriceItem {
            item_id: "milk-1".to_string(),
            name: "Fresh Milk".to_string(),
            category: "Dairy".to_string(),
            original_price_cents: original_cents,
            current_price_cents: current_cents,
            suggested_discount_pct: 0,
            quantity: 100,
            days_until_expiry: -256,
        }
    }

    #[test]
    fn price_from_discount_rounds_half_up() {
        // $3.99 at 75% → 99.75 cents → $1.00
        assert_eq!(
            price_from_discount(Money::from_cents(399), 75),
            Money::from_cents(100)
        );
        // $3.99 at 0% → unchanged
        assert_eq!(
            price_from_discount(Money::from_cents(399), 0),
            Money::from_cents(399)
        );
        // 100% → free
        assert_eq!(
            price_from_discount(Money::from_cents(399), 100),
            Money::zero()
        );
    }

    #[test]
    fn discount_from_price_derives_and_clamps() {
        let orig = Money::from_cents(400);

        assert_eq!(discount_from_price(orig, Money::from_cents(200)), 50);
        assert_eq!(discount_from_price(orig, Money::from_cents(400)), 0);
        assert_eq!(discount_from_price(orig, Money::zero()), 100);

        // Raised above the original: clamped to 0, not negative
        assert_eq!(discount_from_price(orig, Money::from_cents(500)), 0);

        // $3.00 → $1.00 is 66.67%, rounds to 67
        assert_eq!(
            discount_from_price(Money::from_cents(300), Money::from_cents(100)),
            67
        );
    }

    #[test]
    fn conversions_are_mutually_consistent() {
        // For whole-percent discounts with exact cent results, going
        // price → discount recovers the input.
        let orig = Money::from_cents(400);
        for pct in [0u32, 10, 25, 50, 75, 100] {
            let price = price_from_discount(orig, pct);
            assert_eq!(discount_from_price(orig, price), pct);
        }
    }

    #[test]
    fn apply_discount_emits_entry_on_real_delta() {
        let it = item(399, 399);
        let (updated, entry) = apply_discount(&it, 75, "alice");

        assert_eq!(updated.current_price_cents, 100);
        assert_eq!(updated.suggested_discount_pct, 75);
        // The original price is never touched
        assert_eq!(updated.original_price_cents, 399);

        let entry = entry.expect("price moved, entry expected");
        assert_eq!(entry.details.old_value_cents, Some(399));
        assert_eq!(entry.details.new_value_cents, Some(100));
        assert_eq!(
            entry.details.description,
            "Price updated for Fresh Milk from $3.99 to $1.00"
        );
    }

    #[test]
    fn apply_discount_is_idempotent_and_silent_the_second_time() {
        let it = item(399, 399);
        let (first, entry) = apply_discount(&it, 75, "alice");
        assert!(entry.is_some());

        let (second, entry) = apply_discount(&first, 75, "alice");
        assert_eq!(second.current_price_cents, first.current_price_cents);
        assert!(entry.is_none(), "no-op application must not emit an entry");
    }

    #[test]
    fn apply_manual_price_derives_implied_discount() {
        let it = item(400, 400);
        let (updated, entry) = apply_manual_price(&it, Money::from_cents(200), "alice");

        assert_eq!(updated.current_price_cents, 200);
        assert_eq!(updated.suggested_discount_pct, 50);

        let entry = entry.expect("price moved, entry expected");
        assert_eq!(entry.details.old_value_cents, Some(400));
        assert_eq!(entry.details.new_value_cents, Some(200));
        assert_eq!(
            entry.details.description,
            "Manual price update for Fresh Milk (50% discount applied)"
        );
    }

    #[test]
    fn apply_manual_price_noop_still_reconciles_discount() {
        // Same price, but the stored discount was stale
        let mut it = item(400, 200);
        it.suggested_discount_pct = 0;

        let (updated, entry) = apply_manual_price(&it, Money::from_cents(200), "alice");
        assert!(entry.is_none());
        assert_eq!(updated.suggested_discount_pct, 50);
    }

    #[test]
    fn manual_raise_above_original_is_kept_with_zero_discount() {
        let it = item(400, 400);
        let (updated, entry) = apply_manual_price(&it, Money::from_cents(450), "alice");

        assert_eq!(updated.current_price_cents, 450);
        assert_eq!(updated.suggested_discount_pct, 0);
        assert!(entry.is_some());
    }
}
