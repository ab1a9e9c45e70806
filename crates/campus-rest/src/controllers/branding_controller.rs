//! Institute and branch header data for the front end.

use crate::{
    extractors::Session,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use campus_service::BranchBranding;

pub fn router() -> Router<AppState> {
    Router::new().route("/:branch_id", get(branding))
}

async fn branding(
    State(state): State<AppState>,
    _session: Session,
    Path(branch_id): Path<i64>,
) -> ApiResult<BranchBranding> {
    ok(state.services.branding.for_branch(branch_id).await?)
}
