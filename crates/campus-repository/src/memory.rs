//! Process-local repository.
//!
//! Keeps records in a map and counts every call so tests can assert on how
//! often the source of truth was consulted.

use crate::{EntityRepository, Filter};
use async_trait::async_trait;
use campus_core::{CrmError, CrmResult, Entity};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use tracing::debug;

/// Repository backed by an in-memory map.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    rows: RwLock<BTreeMap<i64, E>>,
    next_id: AtomicI64,
    reads: AtomicUsize,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryRepository<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Number of `find_one`/`find_all` calls so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `create`/`update` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reset_counts(&self) {
        self.reads.store(0, Ordering::SeqCst);
        self.writes.store(0, Ordering::SeqCst);
    }

    /// Makes every subsequent call fail with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Raw stored row, bypassing filters and counters.
    pub fn stored(&self, id: i64) -> Option<E> {
        self.rows.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn check_available(&self) -> CrmResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CrmError::Database(format!("{} store unavailable", E::TABLE)));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for InMemoryRepository<E> {
    async fn create(&self, record: &E) -> CrmResult<E> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut stored = record.clone();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        stored.assign_id(id);
        self.rows.write().insert(id, stored.clone());

        debug!("Inserted {} row {}", E::TABLE, id);
        Ok(stored)
    }

    async fn find_one(&self, filter: &Filter) -> CrmResult<Option<E>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self
            .rows
            .read()
            .values()
            .find(|record| filter.matches(*record))
            .cloned())
    }

    async fn find_all(&self, filter: &Filter) -> CrmResult<Vec<E>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self
            .rows
            .read()
            .values()
            .filter(|record| filter.matches(*record))
            .cloned()
            .collect())
    }

    async fn update(&self, record: &E) -> CrmResult<E> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut rows = self.rows.write();
        let slot = rows
            .get_mut(&record.id())
            .ok_or_else(|| CrmError::not_found(E::NAME, record.id()))?;

        let mut stored = record.clone();
        stored.touch(Utc::now());
        *slot = stored.clone();
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::{RecordStatus, Section};

    fn section(title: &str) -> Section {
        let now = Utc::now();
        Section {
            section_id: 0,
            title: title.to_string(),
            code: title.to_uppercase(),
            start_date: None,
            end_date: None,
            status: RecordStatus::Active,
            added_by: Some(1),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryRepository::<Section>::new();
        let first = repo.create(&section("2024")).await.unwrap();
        let second = repo.create(&section("2025")).await.unwrap();

        assert_eq!(first.section_id, 1);
        assert_eq!(second.section_id, 2);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.write_count(), 2);
    }

    #[tokio::test]
    async fn test_find_applies_status_filter() {
        let repo = InMemoryRepository::<Section>::new();
        let created = repo.create(&section("2024")).await.unwrap();

        let mut deleted = created.clone();
        deleted.status = RecordStatus::Deleted;
        repo.update(&deleted).await.unwrap();

        let live = repo
            .find_one(&Filter::by_id::<Section>(created.section_id).live())
            .await
            .unwrap();
        assert!(live.is_none());

        let any = repo
            .find_one(&Filter::by_id::<Section>(created.section_id))
            .await
            .unwrap();
        assert_eq!(any.unwrap().status, RecordStatus::Deleted);
        assert_eq!(repo.read_count(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = InMemoryRepository::<Section>::new();
        let mut ghost = section("ghost");
        ghost.section_id = 99;

        let err = repo.update(&ghost).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_failing_store_reports_database_error() {
        let repo = InMemoryRepository::<Section>::new();
        repo.set_failing(true);

        let err = repo.create(&section("2024")).await.unwrap_err();
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(repo.is_empty());
    }
}
