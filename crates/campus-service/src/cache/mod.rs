//! Caching infrastructure for the service layer.
//!
//! A process-local [`MemoryCacheStore`] sits behind the [`CacheStore`] seam.
//! Which keys belong to which record type is declared per entity in
//! [`rules`] and consumed by the generic cache-aside accessor.

mod memory_store;
mod pattern;
pub mod rules;
mod store;
mod sweeper;

pub use memory_store::{CacheEvent, CacheListener, MemoryCacheStore};
pub use pattern::glob_to_regex;
pub use rules::{CachePolicy, CacheRules, Dimension, ListRule, ListScope};
pub use store::{CacheExt, CacheStats, CacheStore};
pub use sweeper::{spawn_sweeper, SweeperHandle};
