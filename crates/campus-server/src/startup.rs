//! Server startup utilities.

use campus_config::AppConfig;
use tracing::info;

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("{} v{} ({})", config.app.name, config.app.version, config.app.environment);
    info!("REST API:  http://{}/api", addr);
    info!("Health:    http://{}/health", addr);
    info!("Uploads:   {}", config.uploads.root_dir);
    info!(
        "Cache:     ttl {}s, sweep every {}s",
        config.cache.default_ttl_secs, config.cache.check_period_secs
    );
    info!("{}", separator);
}
