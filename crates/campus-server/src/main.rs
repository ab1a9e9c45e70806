//! # Campus CRM Server
//!
//! Main entry point: loads configuration, connects to MySQL, wires the
//! cached services and serves the REST API until a shutdown signal.

use campus_config::{AppConfig, ConfigLoader};
use campus_core::{CrmError, CrmResult};
use campus_repository::create_pool;
use campus_server::{app, startup, telemetry};
use campus_service::Repositories;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_logging(&config.observability);

    info!("Starting Campus CRM Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> CrmResult<()> {
    let db_pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let repos = Repositories::mysql(&db_pool);
    let application = app::build(&config, &repos);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CrmError::Internal(format!("Failed to bind {addr}: {e}")))?;

    startup::print_startup_info(&config);

    axum::serve(listener, application.router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CrmError::Internal(format!("REST server error: {e}")))?;

    application.sweeper.stop().await;
    db_pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
