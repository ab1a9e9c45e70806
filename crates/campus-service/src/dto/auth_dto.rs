//! Authentication DTOs.

use campus_core::rules::contact_number;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request to create the first super admin of a deployment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuperAdminRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub user_name: String,

    #[validate(custom(function = "contact_number"))]
    pub contact: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub confirm_password: String,
}
