//! Builds the running application from configuration and repositories.

use campus_config::AppConfig;
use campus_rest::{create_router, AppState, UploadStore};
use campus_security::{PasswordHasher, TokenProvider};
use campus_service::{
    spawn_sweeper, CacheEvent, MemoryCacheStore, Repositories, ServiceRegistry, SweeperHandle,
};
use axum::Router;
use std::sync::Arc;
use tracing::{debug, info};

/// Router plus the background work that must be stopped on shutdown.
pub struct Application {
    pub router: Router,
    pub services: ServiceRegistry,
    pub cache: Arc<MemoryCacheStore>,
    pub sweeper: SweeperHandle,
}

/// Cache store that reports expiry and flushes to the log.
#[must_use]
pub fn logging_cache(config: &AppConfig) -> Arc<MemoryCacheStore> {
    let cache = Arc::new(MemoryCacheStore::new(config.cache.default_ttl()));
    cache.on_event(|event| match event {
        CacheEvent::Expired { key } => debug!(key = %key, "Cache key expired"),
        CacheEvent::Flushed => info!("Cache flushed"),
    });
    cache
}

/// Wires services, the cache sweeper and the router over `repos`.
///
/// Must be called inside a Tokio runtime.
#[must_use]
pub fn build(config: &AppConfig, repos: &Repositories) -> Application {
    let cache = logging_cache(config);
    let sweeper = spawn_sweeper(Arc::clone(&cache), config.cache.check_period());

    let services = ServiceRegistry::new(
        repos,
        cache.clone(),
        Arc::new(PasswordHasher::new()),
        Arc::new(TokenProvider::new(&config.security)),
    );
    let state = AppState::new(
        services.clone(),
        config.security.clone(),
        UploadStore::new(&config.uploads),
    );
    let router = create_router(state, &config.server);

    Application {
        router,
        services,
        cache,
        sweeper,
    }
}
