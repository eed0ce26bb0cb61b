use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;

use crate::models::{Club, Event};
use crate::services::cache::{CacheKey, CacheManager};
use crate::services::store::{DocumentStore, StoreError};

/// Club and event catalog snapshots, cached in front of the document store.
///
/// Cache failures are logged and fall through to the store.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn DocumentStore>,
    cache: Arc<CacheManager>,
}

impl Catalog {
    pub fn new(store: Arc<dyn DocumentStore>, cache: Arc<CacheManager>) -> Self {
        Self { store, cache }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub async fn clubs(&self) -> Result<Vec<Club>, StoreError> {
        self.cached(&CacheKey::clubs(), || self.store.list_clubs()).await
    }

    pub async fn events(&self) -> Result<Vec<Event>, StoreError> {
        self.cached(&CacheKey::events(), || self.store.list_events()).await
    }

    pub async fn invalidate_clubs(&self) {
        self.invalidate(&CacheKey::clubs()).await;
    }

    pub async fn invalidate_events(&self) {
        self.invalidate(&CacheKey::events()).await;
    }

    async fn cached<T, F, Fut>(&self, key: &str, load: F) -> Result<Vec<T>, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, StoreError>>,
    {
        match self.cache.get::<Vec<T>>(key).await {
            Ok(Some(hit)) => return Ok(hit),
            Ok(None) => {}
            Err(e) => tracing::warn!("Cache read failed for {}: {}", key, e),
        }

        let fresh = load().await?;
        tracing::debug!("Loaded {} records for {}", fresh.len(), key);

        if let Err(e) = self.cache.set(key, &fresh).await {
            tracing::warn!("Cache write failed for {}: {}", key, e);
        }

        Ok(fresh)
    }

    async fn invalidate(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            tracing::warn!("Cache invalidation failed for {}: {}", key, e);
        }
    }
}
