//! End-to-end requests against the router with in-memory storage.

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        Request, StatusCode,
    },
    Router,
};
use campus_config::{SecurityConfig, ServerConfig, UploadConfig};
use campus_rest::{create_router, AppState, UploadStore};
use campus_security::{PasswordHasher, TokenProvider};
use campus_service::{MemoryCacheStore, Repositories, ServiceRegistry, SuperAdminRequest};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

struct App {
    router: Router,
    services: ServiceRegistry,
    _uploads: TempDir,
}

fn app() -> App {
    let repos = Repositories::in_memory();
    let security = SecurityConfig {
        jwt_secret: "router-test-secret".to_string(),
        ..Default::default()
    };
    let services = ServiceRegistry::new(
        &repos,
        Arc::new(MemoryCacheStore::default()),
        Arc::new(PasswordHasher::fast()),
        Arc::new(TokenProvider::new(&security)),
    );
    let uploads = tempfile::tempdir().unwrap();
    let store = UploadStore::new(&UploadConfig {
        root_dir: uploads.path().to_string_lossy().to_string(),
        ..Default::default()
    });

    let state = AppState::new(services.clone(), security, store);
    App {
        router: create_router(state, &ServerConfig::default()),
        services,
        _uploads: uploads,
    }
}

async fn send(app: &App, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, cookie, body)
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Bootstraps a super admin and returns the `name=value` session cookie.
async fn sign_in(app: &App) -> String {
    app.services
        .auth
        .create_super_admin(SuperAdminRequest {
            user_name: "Root".to_string(),
            contact: "9000000000".to_string(),
            email: "root@example.com".to_string(),
            password: "Secret@123".to_string(),
            confirm_password: "Secret@123".to_string(),
        })
        .await
        .unwrap();

    let (status, cookie, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "email": "root@example.com", "password": "Secret@123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["password"], "");

    let cookie = cookie.expect("login sets the session cookie");
    assert!(cookie.contains("HttpOnly"));
    cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, _, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_requests_without_session_are_unauthorized() {
    let app = app();
    let (status, _, body) = send(&app, get("/api/courses?branch_id=1", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_branch_lifecycle() {
    let app = app();
    let cookie = sign_in(&app).await;
    let cookie = Some(cookie.as_str());

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/api/branches",
            cookie,
            &json!({ "branch_name": "Indiranagar", "branch_code": "IND" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Branch created successfully");
    let id = body["data"]["branch_id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], 1);

    let (_, _, body) = send(&app, get("/api/branches", cookie)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/branches/{id}"),
            cookie,
            &json!({ "branch_name": "Koramangala" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = send(&app, get("/api/branches", cookie)).await;
    assert_eq!(body["data"][0]["branch_name"], "Koramangala");

    let (status, _, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/branches/status/{id}"),
            cookie,
            &json!({ "status": 0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], 0);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/branches/{id}"))
        .header(COOKIE, cookie.unwrap())
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(&app, get(&format!("/api/branches/{id}"), cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Branch not found: {id}"));
}

#[tokio::test]
async fn test_invalid_payload_lists_fields() {
    let app = app();
    let cookie = sign_in(&app).await;

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/api/courses",
            Some(&cookie),
            &json!({ "course_name": "  ", "branch_id": 0 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["branch_id", "course_name"]);
}

#[tokio::test]
async fn test_ledger_needs_a_scope() {
    let app = app();
    let cookie = sign_in(&app).await;

    let (status, _, _) = send(&app, get("/api/payments/ledger", Some(&cookie))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) =
        send(&app, get("/api/payments/ledger?admission_id=5", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_payments_by_admission_is_empty_not_missing() {
    let app = app();
    let cookie = sign_in(&app).await;

    let (status, _, body) = send(&app, get("/api/payments?admission_id=42", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = app();
    let cookie = sign_in(&app).await;

    let (status, set_cookie, _) = send(
        &app,
        json_request("POST", "/api/auth/logout", Some(&cookie), &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let set_cookie = set_cookie.unwrap();
    assert!(set_cookie.starts_with("auth_token="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_current_user() {
    let app = app();
    let cookie = sign_in(&app).await;

    let (status, _, body) = send(&app, get("/api/auth/me", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "root@example.com");
    assert_eq!(body["data"]["role"], 1);
}

#[tokio::test]
async fn test_admission_details_routes() {
    let app = app();
    let cookie = sign_in(&app).await;

    let (status, _, body) =
        send(&app, get("/api/admissions/details?branch_id=1", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _, _) = send(&app, get("/api/admissions/details", Some(&cookie))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(&app, get("/api/admissions/details/7", Some(&cookie))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}
