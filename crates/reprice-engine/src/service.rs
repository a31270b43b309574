//! # Pricing Service
//!
//! The orchestration layer: catalog sync, rule saves, catalog-wide rule
//! application, and single-item manual edits.
//!
//! ## Write Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every operation follows validate-then-commit:                         │
//! │                                                                         │
//! │  1. validate inputs (rules, item id) - reject before any mutation      │
//! │  2. read current state from the store                                  │
//! │  3. compute the full result in memory (pure core functions)            │
//! │  4. persist: documents first, then the ledger batch in ONE write       │
//! │                                                                         │
//! │  The service holds no state of its own - the store is ground truth     │
//! │  and every operation re-reads it, so a rejected call leaves nothing    │
//! │  to roll back. Serialization happens before each write; an encoding    │
//! │  failure aborts the operation with the stored state untouched.         │
//! │                                                                         │
//! │  All ledger entries of one operation land as a single batch, so a      │
//! │  concurrent reader never observes a partial batch.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info};

use reprice_core::discount::compute_discount;
use reprice_core::money::Money;
use reprice_core::reconcile;
use reprice_core::rules::PriceRuleConfig;
use reprice_core::types::{CategoryScope, LedgerEntry, PriceItem};
use reprice_core::UNKNOWN_ACTOR;
use reprice_store::{CatalogStore, LedgerStore, Store, StoreEvent};

use crate::error::{EngineError, EngineResult};

// =============================================================================
// PricingService
// =============================================================================

/// Orchestrates discount computation, reconciliation, and audit logging
/// over a shared document store.
///
/// The only component the external UI calls directly. Cheap to clone;
/// clones share the same underlying store.
#[derive(Clone)]
pub struct PricingService {
    store: Arc<dyn Store>,
    catalog: CatalogStore,
    ledger: LedgerStore,
}

impl PricingService {
    /// Creates a service over any injected store backend.
    pub fn new(store: Arc<dyn Store>) -> Self {
        PricingService {
            catalog: CatalogStore::new(store.clone()),
            ledger: LedgerStore::new(store.clone()),
            store,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// The working catalog.
    pub async fn items(&self) -> EngineResult<Vec<PriceItem>> {
        Ok(self.catalog.items().await?)
    }

    /// The active ruleset (defaults if none was ever saved).
    pub async fn rules(&self) -> EngineResult<PriceRuleConfig> {
        Ok(self.catalog.rules().await?)
    }

    /// Read access to the audit log for the ledger viewer.
    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Change notifications: fires after every persisted write. Readers
    /// re-fetch on notification instead of trusting cached state.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }

    // -------------------------------------------------------------------------
    // Catalog Sync
    // -------------------------------------------------------------------------

    /// Replaces the working catalog with a fresh set of items.
    ///
    /// Used when the catalog collaborator pushes a new import. Does not
    /// compute discounts; emits one `InventoryUpdate` summary entry.
    pub async fn sync_catalog(
        &self,
        items: Vec<PriceItem>,
        actor: Option<&str>,
    ) -> EngineResult<Vec<PriceItem>> {
        let actor = resolve_actor(actor);
        let count = items.len();

        self.catalog.save_items(&items).await?;
        self.ledger
            .append(LedgerEntry::inventory_update(
                actor,
                format!("Synced {count} items"),
                count as u32,
            ))
            .await?;

        info!(actor = %actor, count, "Catalog synced");
        Ok(items)
    }

    // -------------------------------------------------------------------------
    // Rule Application
    // -------------------------------------------------------------------------

    /// Runs the calculator and reconciler over every item under the
    /// currently active rules.
    ///
    /// Produces one `PriceChange` entry per item whose price actually
    /// moved, plus one trailing `BulkPriceChange` summary counting those
    /// real deltas (not the catalog size). The whole set is appended as a
    /// single batch.
    pub async fn apply_rules_to_all(&self, actor: Option<&str>) -> EngineResult<Vec<PriceItem>> {
        let actor = resolve_actor(actor);
        let rules = self.catalog.rules().await?;
        let items = self.catalog.items().await?;

        let (updated, mut entries) = reprice_catalog(&items, &rules, actor);
        let affected = entries.len() as u32;
        entries.push(LedgerEntry::bulk_price_change(
            actor,
            bulk_description(&rules),
            affected,
        ));

        self.catalog.save_items(&updated).await?;
        self.ledger.append_batch(entries).await?;

        info!(actor = %actor, total = updated.len(), affected, "Applied rules to catalog");
        Ok(updated)
    }

    /// Validates and persists a new ruleset, then immediately re-applies
    /// it to every item.
    ///
    /// The ledger batch records the rule transition (old and new config),
    /// each real price change, and the bulk summary. A failed validation
    /// is rejected atomically: no rule update, no catalog change, no
    /// ledger entry.
    pub async fn save_rules(
        &self,
        new_rules: PriceRuleConfig,
        actor: Option<&str>,
    ) -> EngineResult<Vec<PriceItem>> {
        new_rules.validate()?;

        let actor = resolve_actor(actor);
        let old_rules = self.catalog.rules().await?;
        let items = self.catalog.items().await?;

        let (updated, item_entries) = reprice_catalog(&items, &new_rules, actor);
        let affected = item_entries.len() as u32;

        let mut entries = Vec::with_capacity(item_entries.len() + 2);
        entries.push(LedgerEntry::rule_update(
            actor,
            rule_description(&new_rules),
            old_rules,
            new_rules.clone(),
        ));
        entries.extend(item_entries);
        entries.push(LedgerEntry::bulk_price_change(
            actor,
            bulk_description(&new_rules),
            affected,
        ));

        self.catalog.save_rules(&new_rules).await?;
        self.catalog.save_items(&updated).await?;
        self.ledger.append_batch(entries).await?;

        info!(actor = %actor, affected, "Saved and applied new price rules");
        Ok(updated)
    }

    // -------------------------------------------------------------------------
    // Manual Edit
    // -------------------------------------------------------------------------

    /// Overrides one item's price by hand.
    ///
    /// The implied discount is derived from the price and stored on the
    /// item. An unknown `item_id` is rejected with no state change and no
    /// ledger entry; a no-op price (same as current) rewrites the item but
    /// stays out of the ledger.
    pub async fn edit_item_manually(
        &self,
        item_id: &str,
        new_price: Money,
        actor: Option<&str>,
    ) -> EngineResult<PriceItem> {
        let actor = resolve_actor(actor);
        let mut items = self.catalog.items().await?;

        let Some(index) = items.iter().position(|item| item.item_id == item_id) else {
            return Err(EngineError::UnknownItem(item_id.to_string()));
        };

        let (updated, entry) = reconcile::apply_manual_price(&items[index], new_price, actor);
        items[index] = updated.clone();

        self.catalog.save_items(&items).await?;
        if let Some(entry) = entry {
            self.ledger.append(entry).await?;
        } else {
            debug!(item_id, "Manual edit kept the current price; no ledger entry");
        }

        info!(actor = %actor, item_id, price = %new_price, "Manual price edit");
        Ok(updated)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Actor identity with the documented fallback.
fn resolve_actor(actor: Option<&str>) -> &str {
    match actor {
        Some(actor) if !actor.trim().is_empty() => actor,
        _ => UNKNOWN_ACTOR,
    }
}

/// Runs calculator + reconciler over the whole catalog, collecting the
/// updated items and the per-item entries for real price deltas.
fn reprice_catalog(
    items: &[PriceItem],
    rules: &PriceRuleConfig,
    actor: &str,
) -> (Vec<PriceItem>, Vec<LedgerEntry>) {
    let mut updated = Vec::with_capacity(items.len());
    let mut entries = Vec::new();

    for item in items {
        let pct = compute_discount(item, rules);
        let (next, entry) = reconcile::apply_discount(item, pct, actor);
        updated.push(next);
        entries.extend(entry);
    }

    (updated, entries)
}

/// Description for the `PriceRuleUpdate` entry.
fn rule_description(rules: &PriceRuleConfig) -> String {
    let scope = match &rules.category_scope {
        CategoryScope::All => "Applied to all categories".to_string(),
        CategoryScope::Only(category) => format!("Applied to the {category} category"),
    };
    format!(
        "Updated price rules: Max {}% discount, {}",
        rules.max_discount_pct, scope
    )
}

/// Description for the trailing `BulkPriceChange` summary.
fn bulk_description(rules: &PriceRuleConfig) -> String {
    match &rules.category_scope {
        CategoryScope::All => "Applied new price rules to all items".to_string(),
        CategoryScope::Only(category) => {
            format!("Applied new price rules to the {category} category")
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
