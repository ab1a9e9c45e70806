//! What a branch offers: courses, their batches, and standalone services.

use crate::RecordStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    pub course_code: Option<String>,
    pub duration: Option<String>,
    pub fees: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub certificate_offered: Option<String>,
    pub status: RecordStatus,
    pub branch_id: i64,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Course, "Course", "tbl_course", course_id);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Batch {
    pub batch_id: i64,
    pub batch_name: String,
    pub batch_code: Option<String>,
    pub course_id: i64,
    pub batch_time: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub teacher_name: Option<String>,
    pub status: RecordStatus,
    pub branch_id: i64,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Batch, "Batch", "tbl_batch", batch_id);

/// A non-course offering sold by a branch (certification, lab access, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ServiceOffering {
    pub service_id: i64,
    pub service_name: String,
    pub service_details: Option<String>,
    pub status: RecordStatus,
    pub branch_id: i64,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(ServiceOffering, "Service", "tbl_service", service_id);
