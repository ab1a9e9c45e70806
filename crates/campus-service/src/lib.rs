//! # Campus Service
//!
//! Business logic for the Campus CRM backend.
//!
//! Every record type is served through a [`CacheAside`] accessor that reads
//! through a process-local cache and evicts exactly the keys a write could
//! have made stale. Services layer request validation and the actor and
//! parent gates on top of the accessors.

pub mod accessor;
pub mod cache;
pub mod dto;
pub mod gate;
pub mod registry;
pub mod services;

pub use accessor::CacheAside;
pub use cache::*;
pub use dto::*;
pub use gate::{ActorGate, Parent, ParentGate, Stage};
pub use registry::{Repositories, ServiceRegistry};
pub use services::*;
