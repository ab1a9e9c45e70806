//! Request payloads accepted by the services.
//!
//! A draft carries the caller-supplied fields of a new record. A patch
//! carries the fields to overwrite on an existing one; absent fields are
//! left untouched. Keys, status, `added_by` and timestamps never come from
//! the caller.

/// Copies every present patch field onto the record.
///
/// Fields under `optional` are nullable on the record.
macro_rules! apply_patch {
    ($record:ident, $patch:ident { $($field:ident),* $(,)? } $(optional { $($opt:ident),* $(,)? })?) => {
        $(
            if let Some(value) = $patch.$field {
                $record.$field = value;
            }
        )*
        $($(
            if let Some(value) = $patch.$opt {
                $record.$opt = Some(value);
            }
        )*)?
    };
}

mod admission_dto;
mod auth_dto;
mod catalog_dto;
mod organization_dto;
mod payment_dto;
mod people_dto;

pub use admission_dto::*;
pub use auth_dto::*;
pub use catalog_dto::*;
pub use organization_dto::*;
pub use payment_dto::*;
pub use people_dto::*;
