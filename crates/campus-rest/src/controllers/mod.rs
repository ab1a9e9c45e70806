//! REST API controllers.

pub mod admission_detail_controller;
pub mod auth_controller;
pub mod branding_controller;
pub mod health_controller;
pub mod ledger_controller;
pub mod record_controller;
pub mod upload_controller;
pub mod user_controller;

pub use health_controller::*;
pub use record_controller::{Resource, StatusRequest};
