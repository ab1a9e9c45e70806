//! CRUD routes shared by every record type served by a [`RecordService`].

use crate::{
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
use campus_core::{
    Admission, AdmissionCourse, AdmissionService, Batch, Branch, Course, Document, Enquiry,
    Institute, Payment, PaymentCourse, PaymentService, RecordStatus, Section, ServiceOffering,
};
use campus_service::{EntityWorkflow, RecordService, ServiceRegistry};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// A record type exposed as a REST resource.
pub trait Resource: EntityWorkflow {
    fn service(services: &ServiceRegistry) -> &Arc<RecordService<Self>>;
}

macro_rules! resource {
    ($($record:ty => $field:ident),* $(,)?) => {$(
        impl Resource for $record {
            fn service(services: &ServiceRegistry) -> &Arc<RecordService<Self>> {
                &services.$field
            }
        }
    )*};
}

resource! {
    Institute => institutes,
    Branch => branches,
    Section => sections,
    Course => courses,
    Batch => batches,
    ServiceOffering => services,
    Enquiry => enquiries,
    Admission => admissions,
    AdmissionCourse => admission_courses,
    AdmissionService => admission_services,
    Document => documents,
    Payment => payments,
    PaymentCourse => payment_courses,
    PaymentService => payment_services,
}

/// Body of `PUT /status/:id`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusRequest {
    pub status: RecordStatus,
}

/// Creates the router for one record type.
pub fn router<E: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<E>).post(create::<E>))
        .route("/:id", get(fetch::<E>).put(update::<E>).delete(remove::<E>))
        .route("/status/:id", put(change_status::<E>))
}

async fn list<E: Resource>(
    State(state): State<AppState>,
    _session: Session,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<E>> {
    let records = E::service(&state.services).list(query.scope()).await?;
    ok(records.into_iter().map(E::redacted).collect())
}

async fn fetch<E: Resource>(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<i64>,
) -> ApiResult<E> {
    let record = E::service(&state.services).get(id).await?;
    ok(record.redacted())
}

async fn create<E: Resource>(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(draft): ValidatedJson<E::Draft>,
) -> Result<(StatusCode, Json<ApiResponse<E>>), AppError> {
    debug!("Create {} request by {}", E::NAME, session.reg_id());

    let record = E::service(&state.services)
        .create(session.reg_id(), draft)
        .await?;
    Ok(created(
        &format!("{} created successfully", E::NAME),
        record.redacted(),
    ))
}

async fn update<E: Resource>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    ValidatedJson(patch): ValidatedJson<E::Patch>,
) -> ApiResult<E> {
    debug!("Update {} {} request by {}", E::NAME, id, session.reg_id());

    let record = E::service(&state.services)
        .update(session.reg_id(), id, patch)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        format!("{} updated successfully", E::NAME),
        record.redacted(),
    )))
}

async fn change_status<E: Resource>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(request): Json<StatusRequest>,
) -> ApiResult<E> {
    let record = E::service(&state.services)
        .change_status(session.reg_id(), id, request.status)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        format!("{} status updated successfully", E::NAME),
        record.redacted(),
    )))
}

async fn remove<E: Resource>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    E::service(&state.services)
        .delete(session.reg_id(), id)
        .await?;
    done(format!("{} deleted successfully", E::NAME))
}
