//! Custom Axum extractors.

mod scope;
mod session;
mod validated;

pub use scope::*;
pub use session::*;
pub use validated::*;
