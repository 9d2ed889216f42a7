use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::types::LearnedItem;

/// Keyed persistence for learned items.
///
/// Every call is atomic for a single `(scope, key)` and a write is visible
/// to any later `get` for the same key. Nothing stronger is promised.
#[async_trait]
pub trait LearnStore: Send + Sync {
    /// Fetch the item stored under `(scope, key)`.
    async fn get(&self, scope: &str, key: &str) -> Result<LearnedItem, StoreError>;

    /// Store an item. An existing item under the same key is replaced.
    async fn new_item(&self, item: LearnedItem) -> Result<(), StoreError>;

    /// Store an item only if its key is free. Returns `false` when an item
    /// was already present, in which case nothing is written.
    async fn insert_if_absent(&self, item: LearnedItem) -> Result<bool, StoreError>;

    /// Delete the item under `(scope, key)`. Deleting a missing item is not an error.
    async fn remove(&self, scope: &str, key: &str) -> Result<(), StoreError>;
}

/// Map-backed store for tests and throwaway deployments.
#[derive(Clone, Default)]
pub struct InMemoryLearnStore {
    items: Arc<RwLock<HashMap<(String, String), LearnedItem>>>,
}

impl InMemoryLearnStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items across all scopes.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl LearnStore for InMemoryLearnStore {
    async fn get(&self, scope: &str, key: &str) -> Result<LearnedItem, StoreError> {
        let items = self.items.read().await;
        items
            .get(&(scope.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::not_found(scope, key))
    }

    async fn new_item(&self, item: LearnedItem) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        items.insert(item.key(), item);
        Ok(())
    }

    async fn insert_if_absent(&self, item: LearnedItem) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        let key = item.key();
        if items.contains_key(&key) {
            return Ok(false);
        }
        items.insert(key, item);
        Ok(true)
    }

    async fn remove(&self, scope: &str, key: &str) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        items.remove(&(scope.to_string(), key.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = InMemoryLearnStore::new();
        let err = store.get("g1", "greet").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryLearnStore::new();
        store
            .new_item(LearnedItem::new("g1", "greet", "Hello there"))
            .await
            .unwrap();

        let item = store.get("g1", "greet").await.unwrap();
        assert_eq!(item.response, "Hello there");
    }

    #[tokio::test]
    async fn test_items_are_scoped_by_guild() {
        let store = InMemoryLearnStore::new();
        store
            .new_item(LearnedItem::new("g1", "greet", "Hello there"))
            .await
            .unwrap();

        assert!(store.get("g2", "greet").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_insert_if_absent_keeps_existing() {
        let store = InMemoryLearnStore::new();
        assert!(store
            .insert_if_absent(LearnedItem::new("g1", "greet", "first"))
            .await
            .unwrap());
        assert!(!store
            .insert_if_absent(LearnedItem::new("g1", "greet", "second"))
            .await
            .unwrap());

        assert_eq!(store.get("g1", "greet").await.unwrap().response, "first");
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let store = InMemoryLearnStore::new();
        store.remove("g1", "nothing").await.unwrap();
        assert!(store.is_empty().await);
    }
}
