//! User account and enquiry payloads.

use crate::gate::Parent;
use crate::services::EntityWorkflow;
use campus_core::rules::{contact_number, not_blank};
use campus_core::{CrmError, CrmResult, Enquiry, RecordStatus, Role, User};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a staff account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserDraft {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub user_name: String,

    #[validate(custom(function = "contact_number"))]
    pub contact: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub confirm_password: String,

    pub branch_id: Option<i64>,

    pub role: Role,
}

impl UserDraft {
    /// Fails unless both password fields agree.
    pub fn check_passwords(&self) -> CrmResult<()> {
        passwords_match(&self.password, &self.confirm_password)
    }
}

/// Request to update a staff account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserPatch {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub user_name: Option<String>,

    #[validate(custom(function = "contact_number"))]
    pub contact: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    pub confirm_password: Option<String>,

    pub branch_id: Option<i64>,

    pub role: Option<Role>,
}

impl UserPatch {
    /// A new password must come with a matching confirmation.
    pub fn check_passwords(&self) -> CrmResult<()> {
        match (&self.password, &self.confirm_password) {
            (None, None) => Ok(()),
            (Some(password), Some(confirm)) => passwords_match(password, confirm),
            _ => Err(CrmError::validation(
                "confirm_password: Password and confirmation must be sent together",
            )),
        }
    }
}

fn passwords_match(password: &str, confirm: &str) -> CrmResult<()> {
    if password == confirm {
        Ok(())
    } else {
        Err(CrmError::validation(
            "confirm_password: Password and confirm password do not match",
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnquiryDraft {
    pub courses: Option<String>,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub full_name: String,
    pub gender: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "contact_number"))]
    pub contact: String,
    pub address: Option<String>,
    pub college_name: Option<String>,
    pub department: Option<String>,
    pub enquiry_date: Option<NaiveDate>,
    pub reference: Option<String>,
    pub source: Option<String>,
    #[validate(range(min = 1))]
    pub branch_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EnquiryPatch {
    pub courses: Option<String>,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub full_name: Option<String>,
    pub gender: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "contact_number"))]
    pub contact: Option<String>,
    pub address: Option<String>,
    pub college_name: Option<String>,
    pub department: Option<String>,
    pub enquiry_date: Option<NaiveDate>,
    pub reference: Option<String>,
    pub source: Option<String>,
    #[validate(range(min = 1))]
    pub branch_id: Option<i64>,
}

impl EntityWorkflow for Enquiry {
    type Draft = EnquiryDraft;
    type Patch = EnquiryPatch;

    fn from_draft(draft: EnquiryDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            enquiry_id: 0,
            courses: draft.courses,
            full_name: draft.full_name,
            gender: draft.gender,
            email: draft.email,
            contact: draft.contact,
            address: draft.address,
            college_name: draft.college_name,
            department: draft.department,
            enquiry_date: draft.enquiry_date.or_else(|| Some(now.date_naive())),
            reference: draft.reference,
            source: draft.source,
            status: RecordStatus::Active,
            branch_id: draft.branch_id,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: EnquiryPatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { full_name, contact, branch_id }
            optional {
                courses, gender, email, address, college_name, department, enquiry_date,
                reference, source,
            });
        Ok(())
    }

    fn parents(&self) -> Vec<Parent> {
        vec![Parent::Branch(self.branch_id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_confirmation() {
        let mut patch = UserPatch {
            password: Some("secret1".to_string()),
            ..Default::default()
        };
        assert!(patch.check_passwords().is_err());

        patch.confirm_password = Some("secret2".to_string());
        assert_eq!(patch.check_passwords().unwrap_err().status_code(), 400);

        patch.confirm_password = Some("secret1".to_string());
        assert!(patch.check_passwords().is_ok());
        assert!(UserPatch::default().check_passwords().is_ok());
    }
}
