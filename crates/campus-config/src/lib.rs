//! # Campus Config
//!
//! Layered configuration for the Campus CRM backend: TOML files, a `.env`
//! file and `CAMPUS__`-prefixed environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
