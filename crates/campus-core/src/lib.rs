//! # Campus Core
//!
//! Core types shared by every layer of the Campus CRM backend: the error
//! taxonomy, the record status lifecycle, the [`Entity`] abstraction and the
//! persisted record types themselves.

pub mod entity;
pub mod error;
pub mod records;
pub mod result;
pub mod status;
pub mod validation;

pub use entity::*;
pub use error::*;
pub use records::*;
pub use result::*;
pub use status::*;
pub use validation::*;
