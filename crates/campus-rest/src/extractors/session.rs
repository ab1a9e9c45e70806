//! Session extractor.

use crate::{responses::AppError, state::AppState};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;
use campus_core::CrmError;
use campus_security::SessionClaims;
use tracing::debug;

/// Claims of the signed-in user making the request.
///
/// The token is read from the session cookie, or from a `Bearer`
/// authorization header for non-browser clients.
#[derive(Debug, Clone)]
pub struct Session(pub SessionClaims);

impl std::ops::Deref for Session {
    type Target = SessionClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = CookieJar::from_headers(&parts.headers)
            .get(&state.security.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| bearer_token(parts))
            .ok_or_else(|| AppError(CrmError::unauthorized("Please sign in to continue")))?;

        let claims = state.services.auth.verify_session(&token)?;
        debug!("Authenticated user: {}", claims.reg_id());

        Ok(Self(claims))
    }
}
