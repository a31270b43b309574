//! # Domain Types
//!
//! Core domain types used throughout the Reprice engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   PriceItem     │   │  LedgerEntry    │   │  EntryDetails   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  item_id        │   │  id (UUID)      │   │  description    │       │
//! │  │  original_price │   │  timestamp      │   │  old/new value  │       │
//! │  │  current_price  │   │  actor          │   │  items_affected │       │
//! │  │  days_to_expiry │   │  action_type    │   │  old/new rules  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  CategoryScope  │   │  ActionType     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  All            │   │  PriceChange    │                             │
//! │  │  Only(name)     │   │  BulkPriceChange│                             │
//! │  └─────────────────┘   │  InventoryUpdate│                             │
//! │                        │  PriceRuleUpdate│                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ledger Immutability
//! A `LedgerEntry` is constructed once and never mutated afterwards. The
//! store treats the log as append-only: "edits" are new entries, never
//! retroactive changes to old ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::rules::PriceRuleConfig;
use crate::{APPROACHING_EXPIRY_DAYS, CRITICAL_EXPIRY_DAYS, NEAR_EXPIRY_DAYS};

// =============================================================================
// Price Item
// =============================================================================

/// One catalog line tracked by the pricing engine.
///
/// Created by catalog sync, mutated by the reconciler on every rule
/// application or manual edit, never deleted by this core (removal is a
/// catalog-sync concern).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceItem {
    /// Stable unique key supplied by the catalog collaborator.
    pub item_id: String,

    /// Display name shown in the price table and in ledger descriptions.
    pub name: String,

    /// Category used for rule scoping (e.g. "Dairy", "Bakery").
    pub category: String,

    /// Immutable reference price in cents (> 0).
    pub original_price_cents: i64,

    /// Current selling price in cents (>= 0).
    ///
    /// By convention at most `original_price_cents`, but a manual override
    /// may raise it; the engine records the override rather than rejecting it.
    pub current_price_cents: i64,

    /// Last discount percentage the engine computed or derived (0-100).
    pub suggested_discount_pct: u32,

    /// Units on hand. Negative quantities are rejected at ingestion by the
    /// unsigned type.
    pub quantity: u32,

    /// Days until the item expires. Negative means already expired; the
    /// catalog collaborator precomputes this from the expiry date and "now".
    pub days_until_expiry: i32,
}

impl PriceItem {
    /// Returns the immutable reference price as Money.
    #[inline]
    pub fn original_price(&self) -> Money {
        Money::from_cents(self.original_price_cents)
    }

    /// Returns the current selling price as Money.
    #[inline]
    pub fn current_price(&self) -> Money {
        Money::from_cents(self.current_price_cents)
    }

    /// An item is expired once its expiry horizon reaches zero.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.days_until_expiry <= 0
    }

    /// Derived shelf-life band, for display badges. Never an input to
    /// pricing; the calculator reads `days_until_expiry` directly.
    pub fn expiry_status(&self) -> ExpiryStatus {
        if self.days_until_expiry <= 0 {
            ExpiryStatus::Expired
        } else if self.days_until_expiry <= CRITICAL_EXPIRY_DAYS {
            ExpiryStatus::Critical
        } else if self.days_until_expiry <= NEAR_EXPIRY_DAYS {
            ExpiryStatus::Near
        } else if self.days_until_expiry <= APPROACHING_EXPIRY_DAYS {
            ExpiryStatus::Approaching
        } else {
            ExpiryStatus::Fresh
        }
    }
}

// =============================================================================
// Expiry Status
// =============================================================================

/// Shelf-life band derived from `days_until_expiry`.
///
/// The bands mirror the calculator's urgency bonuses so the UI badge and
/// the discount always tell the same story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Already expired (0 days or fewer remaining).
    Expired,
    /// 7 days or fewer remaining.
    Critical,
    /// 8-14 days remaining.
    Near,
    /// 15-21 days remaining.
    Approaching,
    /// More than 21 days remaining.
    Fresh,
}

// =============================================================================
// Category Scope
// =============================================================================

/// Which categories a ruleset applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CategoryScope {
    /// Rules apply to every item regardless of category.
    All,
    /// Rules apply only to items in the named category.
    Only(String),
}

impl CategoryScope {
    /// Checks whether an item category falls inside this scope.
    pub fn includes(&self, category: &str) -> bool {
        match self {
            CategoryScope::All => true,
            CategoryScope::Only(scoped) => scoped == category,
        }
    }
}

impl Default for CategoryScope {
    fn default() -> Self {
        CategoryScope::All
    }
}

// =============================================================================
// Action Type
// =============================================================================

/// What kind of mutation a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ActionType {
    /// A single item's price changed (automatic or manual).
    PriceChange,
    /// A rule application touched the whole catalog (summary entry).
    BulkPriceChange,
    /// The catalog itself was replaced or restocked.
    InventoryUpdate,
    /// The active ruleset was saved.
    PriceRuleUpdate,
}

impl ActionType {
    /// Stable label used in ledger queries and serialized entries.
    pub const fn label(&self) -> &'static str {
        match self {
            ActionType::PriceChange => "PriceChange",
            ActionType::BulkPriceChange => "BulkPriceChange",
            ActionType::InventoryUpdate => "InventoryUpdate",
            ActionType::PriceRuleUpdate => "PriceRuleUpdate",
        }
    }
}

// =============================================================================
// Entry Details
// =============================================================================

/// Action-specific payload of a ledger entry.
///
/// One flexible shape rather than an enum per action: every entry carries a
/// human-readable description, and the optional fields are populated per
/// action type (old/new value for `PriceChange`, items_affected for bulk
/// entries, old/new rules for `PriceRuleUpdate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EntryDetails {
    /// Item this entry concerns, when it concerns exactly one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,

    /// Item display name at the time of the change (frozen for the audit
    /// trail; later renames must not rewrite history).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    /// Human-readable summary. Always present; the ledger viewer renders it
    /// verbatim and the query filter searches it.
    pub description: String,

    /// Price before the change, in cents (`PriceChange` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value_cents: Option<i64>,

    /// Price after the change, in cents (`PriceChange` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value_cents: Option<i64>,

    /// How many items actually changed (bulk entries only). Counts real
    /// price deltas, not catalog size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_affected: Option<u32>,

    /// Ruleset in force before the save (`PriceRuleUpdate` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_rules: Option<PriceRuleConfig>,

    /// Ruleset in force after the save (`PriceRuleUpdate` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_rules: Option<PriceRuleConfig>,
}

impl EntryDetails {
    /// Details carrying only a description.
    pub fn describe(description: impl Into<String>) -> Self {
        EntryDetails {
            item_id: None,
            item_name: None,
            description: description.into(),
            old_value_cents: None,
            new_value_cents: None,
            items_affected: None,
            old_rules: None,
            new_rules: None,
        }
    }
}

// =============================================================================
// Ledger Entry
// =============================================================================

/// One immutable audit record.
///
/// ## Ordering
/// `timestamp` is the authoritative ordering key; `id` is for identity only
/// (UUID v4, generation order does not sort). The store keeps entries
/// most-recent-first and breaks timestamp ties by append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerEntry {
    /// Unique entry id (UUID v4).
    pub id: String,

    /// Creation instant.
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,

    /// Attributable identity string; `UNKNOWN_ACTOR` when none was supplied.
    pub actor: String,

    /// What kind of mutation this records.
    pub action_type: ActionType,

    /// Action-specific payload.
    pub details: EntryDetails,
}

impl LedgerEntry {
    /// Stamps a fresh entry: new UUID, current wall-clock time.
    fn new(actor: &str, action_type: ActionType, details: EntryDetails) -> Self {
        LedgerEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            actor: actor.to_string(),
            action_type,
            details,
        }
    }

    /// A single-item price transition (automatic or manual; the description
    /// text is the only thing that distinguishes the two).
    pub fn price_change(
        actor: &str,
        item: &PriceItem,
        old_price: Money,
        new_price: Money,
        description: String,
    ) -> Self {
        LedgerEntry::new(
            actor,
            ActionType::PriceChange,
            EntryDetails {
                item_id: Some(item.item_id.clone()),
                item_name: Some(item.name.clone()),
                old_value_cents: Some(old_price.cents()),
                new_value_cents: Some(new_price.cents()),
                ..EntryDetails::describe(description)
            },
        )
    }

    /// Summary entry for a catalog-wide rule application.
    pub fn bulk_price_change(actor: &str, description: String, items_affected: u32) -> Self {
        LedgerEntry::new(
            actor,
            ActionType::BulkPriceChange,
            EntryDetails {
                items_affected: Some(items_affected),
                ..EntryDetails::describe(description)
            },
        )
    }

    /// Summary entry for a catalog replacement.
    pub fn inventory_update(actor: &str, description: String, items_affected: u32) -> Self {
        LedgerEntry::new(
            actor,
            ActionType::InventoryUpdate,
            EntryDetails {
                items_affected: Some(items_affected),
                ..EntryDetails::describe(description)
            },
        )
    }

    /// Ruleset save, capturing both the prior and the new configuration.
    pub fn rule_update(
        actor: &str,
        description: String,
        old_rules: PriceRuleConfig,
        new_rules: PriceRuleConfig,
    ) -> Self {
        LedgerEntry::new(
            actor,
            ActionType::PriceRuleUpdate,
            EntryDetails {
                old_rules: Some(old_rules),
                new_rules: Some(new_rules),
                ..EntryDetails::describe(description)
            },
        )
    }

    /// Case-insensitive substring match across actor, description, item
    /// name, and action-type label. An empty filter matches everything.
    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();

        self.actor.to_lowercase().contains(&needle)
            || self.details.description.to_lowercase().contains(&needle)
            || self
                .details
                .item_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
            || self
                .action_type
                .label()
                .to_lowercase()
                .contains(&needle)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> PriceItem {
        PriceItem {
            item_id: "milk-1".to_string(),
            name: "Fresh Milk".to_string(),
            category: "Dairy".to_string(),
            original_price_cents: 399,
            current_price_cents: 399,
            suggested_discount_pct: 0,
            quantity: 100,
            days_until_expiry: 5,
        }
    }

    #[test]
    fn test_expiry_status_bands() {
        let mut it = item();

        it.days_until_expiry = -3;
        assert_eq!(it.expiry_status(), ExpiryStatus::Expired);
        assert!(it.is_expired());

        it.days_until_expiry = 0;
        assert_eq!(it.expiry_status(), ExpiryStatus::Expired);

        it.days_until_expiry = 7;
        assert_eq!(it.expiry_status(), ExpiryStatus::Critical);

        it.days_until_expiry = 14;
        assert_eq!(it.expiry_status(), ExpiryStatus::Near);

        it.days_until_expiry = 21;
        assert_eq!(it.expiry_status(), ExpiryStatus::Approaching);

        it.days_until_expiry = 22;
        assert_eq!(it.expiry_status(), ExpiryStatus::Fresh);
        assert!(!it.is_expired());
    }

    #[test]
    fn test_category_scope() {
        assert!(CategoryScope::All.includes("Dairy"));
        assert!(CategoryScope::Only("Dairy".to_string()).includes("Dairy"));
        assert!(!CategoryScope::Only("Dairy".to_string()).includes("Bakery"));
    }

    #[test]
    fn test_price_change_entry_fields() {
        let it = item();
        let entry = LedgerEntry::price_change(
            "alice",
            &it,
            Money::from_cents(399),
            Money::from_cents(100),
            "Price updated for Fresh Milk from $3.99 to $1.00".to_string(),
        );

        assert_eq!(entry.actor, "alice");
        assert_eq!(entry.action_type, ActionType::PriceChange);
        assert_eq!(entry.details.item_id.as_deref(), Some("milk-1"));
        assert_eq!(entry.details.old_value_cents, Some(399));
        assert_eq!(entry.details.new_value_cents, Some(100));
        assert!(entry.details.items_affected.is_none());
    }

    #[test]
    fn test_matches_is_case_insensitive_across_fields() {
        let it = item();
        let entry = LedgerEntry::price_change(
            "Alice",
            &it,
            Money::from_cents(399),
            Money::from_cents(100),
            "Price updated for Fresh Milk from $3.99 to $1.00".to_string(),
        );

        // Actor, description, item name, action label
        assert!(entry.matches("alice"));
        assert!(entry.matches("updated for"));
        assert!(entry.matches("fresh MILK"));
        assert!(entry.matches("pricechange"));

        // Empty filter matches everything
        assert!(entry.matches(""));

        // Non-matching
        assert!(!entry.matches("bakery"));
    }

    #[test]
    fn test_entry_details_optional_fields_skip_serialization() {
        let entry =
            LedgerEntry::bulk_price_change("alice", "Applied new price rules".to_string(), 3);
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"items_affected\":3"));
        assert!(!json.contains("old_value_cents"));
        assert!(!json.contains("old_rules"));
    }
}
