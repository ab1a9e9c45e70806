//! Payment records.
//!
//! Amounts are kept as their decimal text so no precision is lost between
//! the database, the cache and the API.

use crate::RecordStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A payment against an admission, tied to either one enrolled course or
/// one subscribed service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Payment {
    pub payment_id: i64,
    pub admission_id: Option<i64>,
    pub adm_course_id: Option<i64>,
    pub adm_service_id: Option<i64>,
    pub payment_date: NaiveDate,
    pub amount_paid: String,
    pub payment_mode: String,
    pub remark: Option<String>,
    /// Name of the staff member who took the payment.
    pub received_by: String,
    pub status: RecordStatus,
    pub branch_id: Option<i64>,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Payment, "Payment", "tbl_payment", payment_id);

/// Installment paid towards an enrolled course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PaymentCourse {
    pub pay_course_id: i64,
    pub admission_id: i64,
    pub adm_course_id: i64,
    pub section_id: Option<i64>,
    pub payment_date: NaiveDate,
    pub amount_paid: String,
    pub payment_mode: String,
    pub remark: Option<String>,
    pub received_by: String,
    pub status: RecordStatus,
    pub branch_id: i64,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(PaymentCourse, "Course payment", "tbl_payment_course", pay_course_id);

/// Installment paid towards a subscribed service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PaymentService {
    pub pay_service_id: i64,
    pub admission_id: i64,
    pub adm_service_id: i64,
    pub section_id: Option<i64>,
    pub payment_date: NaiveDate,
    pub amount_paid: String,
    pub payment_mode: String,
    pub remark: Option<String>,
    pub received_by: String,
    pub status: RecordStatus,
    pub branch_id: i64,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(PaymentService, "Service payment", "tbl_payment_service", pay_service_id);
