//! Institute, branch and section records.

use crate::RecordStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The institute operating the branches. Usually a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Institute {
    pub inst_id: i64,
    pub inst_name: String,
    pub reg_no: Option<String>,
    pub gst_no: Option<String>,
    pub email: String,
    pub phone_no: String,
    pub alt_phone: Option<String>,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_no: Option<String>,
    /// Public path of the uploaded logo.
    pub logo: Option<String>,
    pub estd_year: Option<String>,
    pub director: Option<String>,
    pub status: RecordStatus,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Institute, "Institute", "tbl_institute", inst_id);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Branch {
    pub branch_id: i64,
    pub branch_name: String,
    pub branch_code: String,
    pub institute_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub alternative_phone: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub established_date: Option<NaiveDate>,
    pub status: RecordStatus,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Branch, "Branch", "tbl_branch", branch_id);

/// Academic session, shared by all branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Section {
    pub section_id: i64,
    pub title: String,
    pub code: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: RecordStatus,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Section, "Section", "tbl_section", section_id);
