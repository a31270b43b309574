//! # In-Memory Store
//!
//! HashMap-backed [`Store`] used by tests and by embedders whose real
//! persistence lives elsewhere (the documents can be mirrored out through
//! the change events).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use crate::error::StoreResult;
use crate::store::{Store, StoreEvent, EVENT_CHANNEL_CAPACITY};

/// In-process store with the same semantics as the durable backends:
/// last write wins, every write publishes a change event.
#[derive(Debug)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, String>>,
    events: broadcast::Sender<StoreEvent>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        MemoryStore {
            documents: RwLock::new(HashMap::new()),
            events,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        self.documents
            .write()
            .await
            .insert(key.to_string(), value);

        // No subscribers is fine; the send result only reports that.
        let _ = self.events.send(StoreEvent {
            key: key.to_string(),
        });

        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_none_for_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let store = MemoryStore::new();
        store.set("k", "v1".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

        // Last write wins
        store.set("k", "v2".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn set_notifies_subscribers_with_the_key() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe();

        store.set("price_rules", "{}".to_string()).await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.key, "price_rules");
    }

    #[tokio::test]
    async fn set_without_subscribers_succeeds() {
        let store = MemoryStore::new();
        store.set("k", "v".to_string()).await.unwrap();
    }
}
