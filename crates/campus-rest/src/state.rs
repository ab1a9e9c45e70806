//! Application state for Axum handlers.

use crate::UploadStore;
use campus_config::SecurityConfig;
use campus_service::ServiceRegistry;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub services: ServiceRegistry,
    pub security: Arc<SecurityConfig>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(services: ServiceRegistry, security: SecurityConfig, uploads: UploadStore) -> Self {
        Self {
            services,
            security: Arc::new(security),
            uploads: Arc::new(uploads),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("services", &self.services)
            .field("cookie_name", &self.security.cookie_name)
            .finish_non_exhaustive()
    }
}
