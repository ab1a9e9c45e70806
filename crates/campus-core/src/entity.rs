//! The persisted-record abstraction shared by repositories and the cache layer.

use crate::RecordStatus;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// A persisted record type.
///
/// Records are plain values: they serialize to the snapshot stored in the
/// cache and their serialized field names are the table's column names.
pub trait Entity:
    Clone + Debug + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    /// Human-readable name used in "not found" errors.
    const NAME: &'static str;
    /// Backing table.
    const TABLE: &'static str;
    /// Primary key column.
    const ID_COLUMN: &'static str;

    fn id(&self) -> i64;

    /// Called by repositories once the primary key is known.
    fn assign_id(&mut self, id: i64);

    fn status(&self) -> RecordStatus;

    fn set_status(&mut self, status: RecordStatus);

    /// Stamps the modification time.
    fn touch(&mut self, at: DateTime<Utc>);

    /// Copy that is safe to return to API callers.
    #[must_use]
    fn redacted(self) -> Self {
        self
    }
}
