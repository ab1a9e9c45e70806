//! Institute, branch and section payloads.

use crate::services::EntityWorkflow;
use campus_core::rules::{contact_number, not_blank};
use campus_core::{Branch, CrmError, CrmResult, Institute, RecordStatus, Role, Section, User};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InstituteDraft {
    #[validate(length(max = 150), custom(function = "not_blank"))]
    pub inst_name: String,
    #[validate(length(max = 50))]
    pub reg_no: Option<String>,
    #[validate(length(max = 20))]
    pub gst_no: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(custom(function = "contact_number"))]
    pub phone_no: String,
    #[validate(custom(function = "contact_number"))]
    pub alt_phone: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    #[validate(length(min = 4, max = 10))]
    pub pin_no: Option<String>,
    /// Public path of an uploaded logo.
    pub logo: Option<String>,
    #[validate(length(equal = 4))]
    pub estd_year: Option<String>,
    pub director: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InstitutePatch {
    #[validate(length(max = 150), custom(function = "not_blank"))]
    pub inst_name: Option<String>,
    pub reg_no: Option<String>,
    pub gst_no: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "contact_number"))]
    pub phone_no: Option<String>,
    #[validate(custom(function = "contact_number"))]
    pub alt_phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_no: Option<String>,
    pub logo: Option<String>,
    #[validate(length(equal = 4))]
    pub estd_year: Option<String>,
    pub director: Option<String>,
}

impl EntityWorkflow for Institute {
    type Draft = InstituteDraft;
    type Patch = InstitutePatch;

    fn from_draft(draft: InstituteDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            inst_id: 0,
            inst_name: draft.inst_name,
            reg_no: draft.reg_no,
            gst_no: draft.gst_no,
            email: draft.email,
            phone_no: draft.phone_no,
            alt_phone: draft.alt_phone,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            pin_no: draft.pin_no,
            logo: draft.logo,
            estd_year: draft.estd_year,
            director: draft.director,
            status: RecordStatus::Active,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: InstitutePatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { inst_name, email, phone_no, address }
            optional { reg_no, gst_no, alt_phone, city, state, pin_no, logo, estd_year, director });
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BranchDraft {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub branch_name: String,
    #[validate(length(max = 20), custom(function = "not_blank"))]
    pub branch_code: String,
    pub institute_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "contact_number"))]
    pub phone: Option<String>,
    #[validate(custom(function = "contact_number"))]
    pub alternative_phone: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    #[validate(length(min = 4, max = 10))]
    pub pincode: Option<String>,
    pub established_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BranchPatch {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub branch_name: Option<String>,
    #[validate(length(max = 20), custom(function = "not_blank"))]
    pub branch_code: Option<String>,
    pub institute_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "contact_number"))]
    pub phone: Option<String>,
    #[validate(custom(function = "contact_number"))]
    pub alternative_phone: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    #[validate(length(min = 4, max = 10))]
    pub pincode: Option<String>,
    pub established_date: Option<NaiveDate>,
}

impl EntityWorkflow for Branch {
    type Draft = BranchDraft;
    type Patch = BranchPatch;

    const WRITE_ROLE: Option<Role> = Some(Role::SuperAdmin);

    fn from_draft(draft: BranchDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            branch_id: 0,
            branch_name: draft.branch_name,
            branch_code: draft.branch_code,
            institute_name: draft.institute_name,
            email: draft.email,
            phone: draft.phone,
            alternative_phone: draft.alternative_phone,
            address: draft.address,
            district: draft.district,
            state: draft.state,
            pincode: draft.pincode,
            established_date: draft.established_date,
            status: RecordStatus::Active,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: BranchPatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { branch_name, branch_code }
            optional {
                institute_name, email, phone, alternative_phone, address, district, state,
                pincode, established_date,
            });
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SectionDraft {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(max = 20), custom(function = "not_blank"))]
    pub code: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SectionPatch {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 20), custom(function = "not_blank"))]
    pub code: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn check_session_dates(section: &Section) -> CrmResult<()> {
    match (section.start_date, section.end_date) {
        (Some(start), Some(end)) if end < start => Err(CrmError::validation(
            "end_date: must not be before start_date",
        )),
        _ => Ok(()),
    }
}

impl EntityWorkflow for Section {
    type Draft = SectionDraft;
    type Patch = SectionPatch;

    fn from_draft(draft: SectionDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        let section = Self {
            section_id: 0,
            title: draft.title,
            code: draft.code,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: RecordStatus::Active,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        };
        check_session_dates(&section)?;
        Ok(section)
    }

    fn apply_patch(&mut self, patch: SectionPatch) -> CrmResult<()> {
        let record = &mut *self;
        apply_patch!(record, patch { title, code } optional { start_date, end_date });
        check_session_dates(self)
    }
}
