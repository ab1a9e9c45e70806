//! Multipart file uploads.
//!
//! Clients upload first and then send the returned path in the `file` of a
//! document or the `logo` of an institute.

use crate::{
    extractors::Session,
    responses::{created, ApiResponse, AppError},
    state::AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use campus_core::CrmError;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/:module", post(upload))
}

fn multipart_error(err: impl std::fmt::Display) -> AppError {
    AppError(CrmError::validation(format!("file: {err}")))
}

async fn upload(
    State(state): State<AppState>,
    session: Session,
    Path(module): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponse>>), AppError> {
    debug!("Upload to {} by {}", module, session.reg_id());

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        state.uploads.check(&content_type, 0)?;

        let bytes = field.bytes().await.map_err(multipart_error)?;
        let path = state
            .uploads
            .save(&module, &file_name, &content_type, &bytes)
            .await?;
        return Ok(created("File uploaded successfully", UploadResponse { path }));
    }

    Err(AppError(CrmError::validation("file: No file was uploaded")))
}
