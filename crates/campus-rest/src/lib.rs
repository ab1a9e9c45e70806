//! # Campus REST
//!
//! HTTP surface of the Campus CRM backend: one resource per record type
//! under `/api`, cookie sessions, and the shared JSON envelope.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;
pub mod uploads;

pub use router::*;
pub use state::*;
pub use uploads::UploadStore;
