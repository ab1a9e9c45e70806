//! Session token claims.

use campus_core::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Registration id of the signed-in user.
    pub sub: i64,

    /// Role at sign-in time.
    pub role: Role,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}

impl SessionClaims {
    /// Creates claims for `reg_id` expiring at `expires_at`.
    #[must_use]
    pub fn new(reg_id: i64, role: Role, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: reg_id,
            role,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Registration id of the session owner.
    #[must_use]
    pub const fn reg_id(&self) -> i64 {
        self.sub
    }

    /// Checks if the token is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Returns the expiration time.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
