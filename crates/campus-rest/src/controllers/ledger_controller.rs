//! Merged payment ledger.

use crate::{
    extractors::Session,
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use campus_core::CrmError;
use campus_service::LedgerEntry;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LedgerQuery {
    pub branch_id: Option<i64>,
    pub admission_id: Option<i64>,
}

/// Mounted next to the payment routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/ledger", get(ledger))
}

async fn ledger(
    State(state): State<AppState>,
    _session: Session,
    Query(query): Query<LedgerQuery>,
) -> ApiResult<Vec<LedgerEntry>> {
    let entries = match (query.admission_id, query.branch_id) {
        (Some(admission_id), _) => state.services.ledger.by_admission(admission_id).await?,
        (None, Some(branch_id)) => state.services.ledger.by_branch(branch_id).await?,
        (None, None) => {
            return Err(AppError(CrmError::validation(
                "branch_id or admission_id is required",
            )))
        }
    };
    ok(entries)
}
