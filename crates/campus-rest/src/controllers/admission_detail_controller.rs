//! Admissions with their documents, courses and services.

use crate::{
    extractors::Session,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use campus_service::AdmissionDetail;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BranchQuery {
    pub branch_id: i64,
}

/// Mounted next to the admission routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/details", get(list_details))
        .route("/details/:id", get(get_detail))
}

async fn list_details(
    State(state): State<AppState>,
    _session: Session,
    Query(query): Query<BranchQuery>,
) -> ApiResult<Vec<AdmissionDetail>> {
    ok(state
        .services
        .admission_details
        .by_branch(query.branch_id)
        .await?)
}

async fn get_detail(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i64>,
) -> ApiResult<AdmissionDetail> {
    ok(state.services.admission_details.get(id).await?)
}
