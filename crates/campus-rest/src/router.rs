//! Main application router.

use crate::{
    controllers::{
        admission_detail_controller, auth_controller, branding_controller, health_controller,
        ledger_controller, record_controller, upload_controller, user_controller,
    },
    middleware::logging_middleware,
    state::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use campus_config::ServerConfig;
use campus_core::{
    Admission, AdmissionCourse, AdmissionService, Batch, Branch, Course, Document, Enquiry,
    Institute, Payment, PaymentCourse, PaymentService, Section, ServiceOffering,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Creates the main application router.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);
    let uploads_dir = state.uploads.root().to_path_buf();

    let api_router = Router::new()
        .nest("/auth", auth_controller::router())
        .nest("/users", user_controller::router())
        .nest("/institutes", record_controller::router::<Institute>())
        .nest("/branches", record_controller::router::<Branch>())
        .nest("/sections", record_controller::router::<Section>())
        .nest("/courses", record_controller::router::<Course>())
        .nest("/batches", record_controller::router::<Batch>())
        .nest("/services", record_controller::router::<ServiceOffering>())
        .nest("/enquiries", record_controller::router::<Enquiry>())
        .nest(
            "/admissions",
            record_controller::router::<Admission>().merge(admission_detail_controller::router()),
        )
        .nest("/admission-courses", record_controller::router::<AdmissionCourse>())
        .nest("/admission-services", record_controller::router::<AdmissionService>())
        .nest("/documents", record_controller::router::<Document>())
        .nest(
            "/payments",
            record_controller::router::<Payment>().merge(ledger_controller::router()),
        )
        .nest("/payment-courses", record_controller::router::<PaymentCourse>())
        .nest("/payment-services", record_controller::router::<PaymentService>())
        .nest("/branding", branding_controller::router())
        .nest("/uploads", upload_controller::router())
        .with_state(state);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api", api_router)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .route("/", get(root))
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints under /api");
    router
}

/// Credentialed CORS for the configured front-end origins.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) if origin != "*" => Some(value),
            _ => {
                warn!("Ignoring CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Campus CRM API"
}
