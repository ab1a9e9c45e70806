//! Persisted record types.
//!
//! Field names double as column names: repositories build their SQL from
//! the serialized form of a record.

/// Implements [`crate::Entity`] for a record with `status` and `updated_at`
/// fields.
macro_rules! impl_entity {
    ($ty:ty, $name:literal, $table:literal, $id:ident) => {
        impl $crate::Entity for $ty {
            const NAME: &'static str = $name;
            const TABLE: &'static str = $table;
            const ID_COLUMN: &'static str = stringify!($id);

            fn id(&self) -> i64 {
                self.$id
            }

            fn assign_id(&mut self, id: i64) {
                self.$id = id;
            }

            fn status(&self) -> $crate::RecordStatus {
                self.status
            }

            fn set_status(&mut self, status: $crate::RecordStatus) {
                self.status = status;
            }

            fn touch(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.updated_at = at;
            }
        }
    };
}

mod admission;
mod catalog;
mod organization;
mod payment;
mod people;

pub use admission::*;
pub use catalog::*;
pub use organization::*;
pub use payment::*;
pub use people::*;
