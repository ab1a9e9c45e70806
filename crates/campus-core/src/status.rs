//! Record lifecycle status and user roles.
//!
//! Both are stored and serialized as small integers so that database rows,
//! cached snapshots and API payloads agree on one encoding.

use crate::CrmError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status shared by every persisted record.
///
/// Soft delete is a transition to [`RecordStatus::Deleted`]; the row stays in
/// place but no read path will return it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[serde(into = "i8", try_from = "i8")]
#[repr(i8)]
pub enum RecordStatus {
    /// Visible but switched off.
    Inactive = 0,
    /// Live record.
    #[default]
    Active = 1,
    /// Soft-deleted.
    Deleted = 2,
}

impl RecordStatus {
    /// Integer code used in storage and on the wire.
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Parses a storage code.
    pub fn from_code(code: i8) -> Result<Self, CrmError> {
        match code {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Active),
            2 => Ok(Self::Deleted),
            other => Err(CrmError::validation(format!("unknown status code {other}"))),
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// All possible statuses.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Inactive, Self::Active, Self::Deleted]
    }
}

impl From<RecordStatus> for i8 {
    fn from(status: RecordStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i8> for RecordStatus {
    type Error = CrmError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Active => write!(f, "active"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// Role of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[serde(into = "i8", try_from = "i8")]
#[repr(i8)]
pub enum Role {
    SuperAdmin = 1,
    Admin = 2,
    #[default]
    User = 3,
}

impl Role {
    /// Integer code used in storage and on the wire.
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Parses a storage code.
    pub fn from_code(code: i8) -> Result<Self, CrmError> {
        match code {
            1 => Ok(Self::SuperAdmin),
            2 => Ok(Self::Admin),
            3 => Ok(Self::User),
            other => Err(CrmError::validation(format!("unknown role code {other}"))),
        }
    }

    #[must_use]
    pub const fn is_super_admin(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl From<Role> for i8 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

impl TryFrom<i8> for Role {
    type Error = CrmError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}
