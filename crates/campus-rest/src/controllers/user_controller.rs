//! User management controller.

use crate::{
    controllers::record_controller::StatusRequest,
    extractors::{ListQuery, Session, ValidatedJson},
    responses::{created, done, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use campus_core::{Entity, User};
use campus_service::{UserDraft, UserPatch};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/status/:id", put(change_status))
}

async fn list_users(
    State(state): State<AppState>,
    _session: Session,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<User>> {
    let users = state.services.users.list(query.scope()).await?;
    ok(users.into_iter().map(User::redacted).collect())
}

async fn get_user(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i64>,
) -> ApiResult<User> {
    ok(state.services.users.get(id).await?.redacted())
}

async fn create_user(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(draft): ValidatedJson<UserDraft>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    debug!("Create user request: {}", draft.email);

    let user = state.services.users.create(session.reg_id(), draft).await?;
    Ok(created("User created successfully", user.redacted()))
}

async fn update_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    ValidatedJson(patch): ValidatedJson<UserPatch>,
) -> ApiResult<User> {
    debug!("Update user request: {}", id);

    let user = state
        .services
        .users
        .update(session.reg_id(), id, patch)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        "User updated successfully",
        user.redacted(),
    )))
}

async fn change_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(request): Json<StatusRequest>,
) -> ApiResult<User> {
    let user = state
        .services
        .users
        .change_status(session.reg_id(), id, request.status)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        "User status updated successfully",
        user.redacted(),
    )))
}

async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    state.services.users.delete(session.reg_id(), id).await?;
    done("User deleted successfully")
}
