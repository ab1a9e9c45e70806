//! Cache store trait for abstracted caching operations.

use async_trait::async_trait;
use campus_core::CrmResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counters reported by a cache store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Live (unexpired) keys.
    pub keys: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Key-value store with per-key expiry.
///
/// Values are JSON strings so the trait stays dyn-compatible. Stored values
/// are snapshots: nothing handed out by a store is connected to the data it
/// was built from.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Gets a raw JSON value.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> CrmResult<Option<String>>;

    /// Stores a raw JSON value, replacing any previous one.
    ///
    /// `None` uses the store's default TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> CrmResult<()>;

    /// Deletes a value. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> CrmResult<bool>;

    /// Deletes every key matching a `*` glob. Returns the number removed.
    async fn delete_pattern(&self, pattern: &str) -> CrmResult<u64>;

    /// Drops every entry.
    async fn flush_all(&self) -> CrmResult<()>;

    /// Checks if a live entry exists for the key.
    async fn has(&self, key: &str) -> CrmResult<bool>;

    /// Live keys, in no particular order.
    async fn keys(&self) -> CrmResult<Vec<String>>;

    fn stats(&self) -> CacheStats;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheStore {
    /// Gets a typed value.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> CrmResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Stores a typed value.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> CrmResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheStore + ?Sized> CacheExt for T {}
