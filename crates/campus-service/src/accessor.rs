//! Generic cache-aside accessor.
//!
//! Reads consult the cache first and fall back to the repository on a miss.
//! Writes go to the repository first; only after it succeeds are the
//! affected keys evicted and the single-record key refreshed.
//!
//! Cache failures never fail an operation. They are logged and the
//! repository result is used as if the cache were absent.

use crate::cache::{CacheExt, CachePolicy, CacheRules, CacheStore, ListScope};
use campus_core::{CrmError, CrmResult, RecordStatus};
use campus_repository::{EntityRepository, Filter};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cache-aside access to one record type.
pub struct CacheAside<E: CachePolicy> {
    repository: Arc<dyn EntityRepository<E>>,
    cache: Arc<dyn CacheStore>,
    rules: CacheRules<E>,
}

impl<E: CachePolicy> Clone for CacheAside<E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
            rules: self.rules.clone(),
        }
    }
}

impl<E: CachePolicy> CacheAside<E> {
    /// Creates an accessor using the record type's own key rules.
    pub fn new(repository: Arc<dyn EntityRepository<E>>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            repository,
            cache,
            rules: E::cache_rules(),
        }
    }

    /// Returns the live record with `id`, reading through the cache.
    pub async fn fetch_one(&self, id: i64) -> CrmResult<E> {
        let key = self.rules.single_key(id);
        if let Some(hit) = self.cached::<E>(&key).await {
            return Ok(hit);
        }

        let record = self.find_live(id).await?;
        self.remember(&key, &record).await;
        Ok(record)
    }

    /// Returns the live records of a list, reading through the cache.
    pub async fn fetch_list(&self, scope: ListScope) -> CrmResult<Vec<E>> {
        let (key, filter) = self.rules.list_target(scope)?;
        if let Some(hit) = self.cached::<Vec<E>>(&key).await {
            return Ok(hit);
        }

        let records = self.repository.find_all(&filter).await?;
        self.remember(&key, &records).await;
        Ok(records)
    }

    /// Live record straight from the repository, never from the cache.
    pub async fn find_live(&self, id: i64) -> CrmResult<E> {
        self.repository
            .find_one(&Filter::by_id::<E>(id).live())
            .await?
            .ok_or_else(|| CrmError::not_found(E::NAME, id))
    }

    /// Inserts a record.
    pub async fn create(&self, record: E) -> CrmResult<E> {
        let created = self.repository.create(&record).await?;
        let id = created.id();

        self.evict(&self.rules.list_keys_of(&created)).await;
        self.refresh_single(&created).await;

        info!("{} created: {}", E::NAME, id);
        Ok(created)
    }

    /// Loads the live record, applies `mutate` and writes the result.
    pub async fn update<F>(&self, id: i64, mutate: F) -> CrmResult<E>
    where
        F: FnOnce(&mut E) -> CrmResult<()> + Send,
    {
        let current = self.find_live(id).await?;
        let mut next = current.clone();
        mutate(&mut next)?;
        self.commit_update(&current, next).await
    }

    /// Writes `next` over `current`.
    ///
    /// Lists holding the old snapshot and lists holding the new one are both
    /// evicted, so a record moved to another scope leaves no stale list
    /// behind.
    pub async fn commit_update(&self, current: &E, mut next: E) -> CrmResult<E> {
        let id = current.id();
        next.assign_id(id);
        let mut stale = self.rules.list_keys_of(current);

        let written = self.repository.update(&next).await?;

        for key in self.rules.list_keys_of(&written) {
            if !stale.contains(&key) {
                stale.push(key);
            }
        }
        self.evict(&stale).await;
        self.refresh_single(&written).await;

        info!("{} updated: {}", E::NAME, id);
        Ok(written)
    }

    /// Switches a record between active and inactive.
    ///
    /// Deleted records are out of reach; use [`soft_delete`] to delete.
    ///
    /// [`soft_delete`]: CacheAside::soft_delete
    pub async fn change_status(&self, id: i64, status: RecordStatus) -> CrmResult<E> {
        if status.is_deleted() {
            return Err(CrmError::validation(
                "Status cannot be set to deleted; delete the record instead",
            ));
        }

        let current = self
            .repository
            .find_one(&Filter::by_id::<E>(id))
            .await?
            .filter(|record| !record.status().is_deleted())
            .ok_or_else(|| CrmError::not_found(E::NAME, id))?;

        let mut next = current.clone();
        next.set_status(status);
        self.commit_update(&current, next).await
    }

    /// Marks a record deleted. The row stays; every read path skips it.
    pub async fn soft_delete(&self, id: i64) -> CrmResult<()> {
        let current = self.find_live(id).await?;
        let mut next = current.clone();
        next.set_status(RecordStatus::Deleted);

        let written = self.repository.update(&next).await?;

        let mut stale = self.rules.list_keys_of(&current);
        for key in self.rules.list_keys_of(&written) {
            if !stale.contains(&key) {
                stale.push(key);
            }
        }
        stale.push(self.rules.single_key(id));
        self.evict(&stale).await;

        info!("{} deleted: {}", E::NAME, id);
        Ok(())
    }

    async fn refresh_single(&self, record: &E) {
        let key = self.rules.single_key(record.id());
        self.evict(std::slice::from_ref(&key)).await;
        self.remember(&key, record).await;
    }

    async fn cached<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, falling back to repository");
                None
            }
        }
    }

    async fn remember<T: Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set(key, value, None).await {
            warn!(key, error = %e, "Cache write failed");
        }
    }

    async fn evict(&self, keys: &[String]) {
        for key in keys {
            match self.cache.delete(key).await {
                Ok(existed) => debug!(key = %key, existed, "Evicted cache key"),
                Err(e) => warn!(key = %key, error = %e, "Cache eviction failed"),
            }
        }
    }
}

impl<E: CachePolicy> std::fmt::Debug for CacheAside<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheAside")
            .field("entity", &E::NAME)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
