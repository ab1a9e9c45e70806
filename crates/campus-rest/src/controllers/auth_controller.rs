//! Authentication controller.

use crate::{
    extractors::{Session, ValidatedJson},
    responses::{created, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use campus_config::SecurityConfig;
use campus_core::{Entity, User};
use campus_service::{LoginRequest, SuperAdminRequest};
use serde::Serialize;
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/super-admin", post(create_super_admin))
        .route("/me", get(get_current_user))
}

/// Body returned by a successful login. The token itself travels in the
/// cookie only.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub expires_at: i64,
}

fn same_site(config: &SecurityConfig) -> SameSite {
    match config.cookie_same_site.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

fn session_cookie(config: &SecurityConfig, token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site(config))
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), AppError> {
    debug!("Login request for: {}", request.email);

    let outcome = state.services.auth.login(request).await?;
    let cookie = session_cookie(
        &state.security,
        outcome.token.token,
        outcome.token.max_age_secs,
    );

    Ok((
        jar.add(cookie),
        Json(ApiResponse::success_with_message(
            "Login successful",
            LoginResponse {
                user: outcome.user.redacted(),
                expires_at: outcome.token.expires_at,
            },
        )),
    ))
}

async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    let jar = jar.remove(Cookie::build(state.security.cookie_name.clone()).path("/"));
    (jar, Json(ApiResponse::message("Logged out successfully")))
}

async fn create_super_admin(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SuperAdminRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    debug!("Super admin bootstrap request: {}", request.email);

    let admin = state.services.auth.create_super_admin(request).await?;
    Ok(created("Super admin created successfully", admin.redacted()))
}

async fn get_current_user(State(state): State<AppState>, session: Session) -> ApiResult<User> {
    let user = state.services.auth.current_user(&session).await?;
    Ok(Json(ApiResponse::success(user.redacted())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = SecurityConfig {
            cookie_secure: true,
            cookie_same_site: "Strict".to_string(),
            ..Default::default()
        };
        let cookie = session_cookie(&config, "tok".to_string(), 60);

        assert_eq!(cookie.name(), "auth_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(60)));
    }
}
