//! # Campus Repository
//!
//! Persistence for every CRM record type behind one generic interface:
//!
//! ```text
//! Service / cache-aside accessor
//!   ↓  Arc<dyn EntityRepository<E>>
//! MySqlRepository<E>        (SQLx, one table per record type)
//! InMemoryRepository<E>     (process-local, used by tests and demos)
//! ```

pub mod filter;
pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use filter::{FieldValue, Filter, StatusFilter};
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use pool::{create_pool, DatabasePool};
pub use traits::EntityRepository;
