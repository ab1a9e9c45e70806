//! Record filters understood by every repository.

use campus_core::{Entity, RecordStatus};
use serde_json::Value;

/// Value compared against a column with equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    /// True when the serialized column value equals this one.
    #[must_use]
    pub fn matches(&self, column: Option<&Value>) -> bool {
        match (self, column) {
            (Self::Int(expected), Some(value)) => value.as_i64() == Some(*expected),
            (Self::Text(expected), Some(value)) => value.as_str() == Some(expected.as_str()),
            _ => false,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Predicate over the record status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Is(RecordStatus),
    In(Vec<RecordStatus>),
    Not(RecordStatus),
}

impl StatusFilter {
    /// Statuses a parent may have when a child record is created under it.
    #[must_use]
    pub fn active() -> Self {
        Self::Is(RecordStatus::Active)
    }

    /// Every status except soft-deleted.
    #[must_use]
    pub fn live() -> Self {
        Self::Not(RecordStatus::Deleted)
    }

    #[must_use]
    pub fn matches(&self, status: RecordStatus) -> bool {
        match self {
            Self::Any => true,
            Self::Is(expected) => status == *expected,
            Self::In(allowed) => allowed.contains(&status),
            Self::Not(excluded) => status != *excluded,
        }
    }
}

/// Conjunction of column equalities and one status predicate.
///
/// Column names are always compile-time constants, never caller input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    equals: Vec<(&'static str, FieldValue)>,
    status: StatusFilter,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches the record with primary key `id`, whatever its status.
    #[must_use]
    pub fn by_id<E: Entity>(id: i64) -> Self {
        Self::new().eq(E::ID_COLUMN, id)
    }

    #[must_use]
    pub fn eq(mut self, column: &'static str, value: impl Into<FieldValue>) -> Self {
        self.equals.push((column, value.into()));
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Excludes soft-deleted records.
    #[must_use]
    pub fn live(self) -> Self {
        self.with_status(StatusFilter::live())
    }

    #[must_use]
    pub fn equals(&self) -> &[(&'static str, FieldValue)] {
        &self.equals
    }

    #[must_use]
    pub fn status(&self) -> &StatusFilter {
        &self.status
    }

    /// Evaluates the filter against a record in memory.
    #[must_use]
    pub fn matches<E: Entity>(&self, record: &E) -> bool {
        if !self.status.matches(record.status()) {
            return false;
        }
        if self.equals.is_empty() {
            return true;
        }
        let Ok(row) = serde_json::to_value(record) else {
            return false;
        };
        self.equals
            .iter()
            .all(|(column, expected)| expected.matches(row.get(*column)))
    }
}
