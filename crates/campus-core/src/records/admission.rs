//! Admissions and the records hanging off them.

use crate::RecordStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Admission {
    pub admission_id: i64,
    pub full_name: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub email: Option<String>,
    pub contact: String,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub college_name: Option<String>,
    pub department: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub reference: Option<String>,
    pub status: RecordStatus,
    pub branch_id: i64,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Admission, "Admission", "tbl_admission", admission_id);

/// Enrolment of an admission into a course batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AdmissionCourse {
    pub adm_course_id: i64,
    pub course_id: i64,
    pub batch_id: Option<i64>,
    pub admission_id: i64,
    pub branch_id: i64,
    pub status: RecordStatus,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(AdmissionCourse, "Admission course", "tbl_admission_course", adm_course_id);

/// Subscription of an admission to a service offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AdmissionService {
    pub adm_service_id: i64,
    pub service_id: i64,
    pub admission_id: i64,
    pub branch_id: i64,
    pub status: RecordStatus,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(AdmissionService, "Admission service", "tbl_admission_service", adm_service_id);

/// An uploaded file attached to an admission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Document {
    pub document_id: i64,
    pub document_name: String,
    /// Public path returned by the upload store.
    pub file: String,
    pub admission_id: i64,
    pub branch_id: i64,
    pub status: RecordStatus,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Document, "Document", "tbl_document", document_id);
