//! Repository trait definitions.

use crate::Filter;
use async_trait::async_trait;
use campus_core::{CrmResult, Entity};

/// Storage for one record type.
///
/// Records go in and come out as plain values; nothing returned here stays
/// connected to the store.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Inserts a record and returns it with its assigned primary key.
    async fn create(&self, record: &E) -> CrmResult<E>;

    /// Returns the first record matching the filter.
    async fn find_one(&self, filter: &Filter) -> CrmResult<Option<E>>;

    /// Returns every record matching the filter, ordered by primary key.
    async fn find_all(&self, filter: &Filter) -> CrmResult<Vec<E>>;

    /// Overwrites the stored fields of an existing record and returns the
    /// stored state.
    async fn update(&self, record: &E) -> CrmResult<E>;
}
