//! Registered users and walk-in enquiries.

use crate::{Entity, RecordStatus, Role};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A registered staff account (`tbl_registration`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub reg_id: i64,
    pub user_name: String,
    pub contact: String,
    pub email: String,
    /// Argon2 PHC string.
    pub password: String,
    pub branch_id: Option<i64>,
    pub role: Role,
    pub status: RecordStatus,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    const NAME: &'static str = "User";
    const TABLE: &'static str = "tbl_registration";
    const ID_COLUMN: &'static str = "reg_id";

    fn id(&self) -> i64 {
        self.reg_id
    }

    fn assign_id(&mut self, id: i64) {
        self.reg_id = id;
    }

    fn status(&self) -> RecordStatus {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = status;
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn redacted(mut self) -> Self {
        self.password.clear();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Enquiry {
    pub enquiry_id: i64,
    /// Free-text list of courses the visitor asked about.
    pub courses: Option<String>,
    pub full_name: String,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub contact: String,
    pub address: Option<String>,
    pub college_name: Option<String>,
    pub department: Option<String>,
    pub enquiry_date: Option<NaiveDate>,
    pub reference: Option<String>,
    pub source: Option<String>,
    pub status: RecordStatus,
    pub branch_id: i64,
    pub added_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Enquiry, "Enquiry", "tbl_enquiry", enquiry_id);
