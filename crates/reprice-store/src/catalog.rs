//! # Catalog Store
//!
//! Load/save access to the `catalog_items` and `price_rules` documents.
//!
//! Reads are total: a never-written catalog is an empty list and
//! never-saved rules are the shipped defaults, so callers don't branch on
//! first-run state.

use std::sync::Arc;

use tracing::debug;

use reprice_core::rules::PriceRuleConfig;
use reprice_core::types::PriceItem;

use crate::error::StoreResult;
use crate::store::{Store, CATALOG_ITEMS_KEY, PRICE_RULES_KEY};

// =============================================================================
// CatalogStore
// =============================================================================

/// Document access for the working catalog and the active ruleset.
#[derive(Clone)]
pub struct CatalogStore {
    store: Arc<dyn Store>,
}

impl CatalogStore {
    /// Creates a catalog store over the shared document store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        CatalogStore { store }
    }

    /// Returns the working catalog; empty if none was ever synced.
    pub async fn items(&self) -> StoreResult<Vec<PriceItem>> {
        match self.store.get(CATALOG_ITEMS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the working catalog.
    pub async fn save_items(&self, items: &[PriceItem]) -> StoreResult<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(CATALOG_ITEMS_KEY, raw).await?;

        debug!(count = items.len(), "Saved catalog items");
        Ok(())
    }

    /// Returns the active ruleset; the shipped defaults if none was saved.
    pub async fn rules(&self) -> StoreResult<PriceRuleConfig> {
        match self.store.get(PRICE_RULES_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(PriceRuleConfig::default()),
        }
    }

    /// Replaces the active ruleset. Validation is the caller's concern;
    /// this layer only persists.
    pub async fn save_rules(&self, rules: &PriceRuleConfig) -> StoreResult<()> {
        let raw = serde_json::to_string(rules)?;
        self.store.set(PRICE_RULES_KEY, raw).await?;

        debug!("Saved price rules");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use reprice_core::types::CategoryScope;

    fn catalog() -> CatalogStore {
        CatalogStore::new(Arc::new(MemoryStore::new()))
    }

    fn item(id: &str) -> PriceItem {
        PriceItem {
            item_id: id.to_string(),
            name: "Fresh Milk".to_string(),
            category: "Dairy".to_string(),
            original_price_cents: 399,
            current_price_cents: 399,
            suggested_discount_pct: 0,
            quantity: 100,
            days_until_expiry: 5,
        }
    }

    #[tokio::test]
    async fn unwritten_catalog_is_empty() {
        assert!(catalog().items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn items_roundtrip() {
        let catalog = catalog();
        let items = vec![item("a"), item("b")];

        catalog.save_items(&items).await.unwrap();
        assert_eq!(catalog.items().await.unwrap(), items);
    }

    #[tokio::test]
    async fn unsaved_rules_read_as_defaults() {
        assert_eq!(
            catalog().rules().await.unwrap(),
            PriceRuleConfig::default()
        );
    }

    #[tokio::test]
    async fn rules_roundtrip_including_scope() {
        let catalog = catalog();
        let rules = PriceRuleConfig {
            max_discount_pct: 60,
            category_scope: CategoryScope::Only("Dairy".to_string()),
            ..PriceRuleConfig::default()
        };

        catalog.save_rules(&rules).await.unwrap();
        assert_eq!(catalog.rules().await.unwrap(), rules);
    }
}
