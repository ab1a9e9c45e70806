//! Admission payloads and the records enrolled under an admission.

use crate::gate::Parent;
use crate::services::EntityWorkflow;
use campus_core::rules::{contact_number, not_blank};
use campus_core::{
    Admission, AdmissionCourse, AdmissionService, CrmResult, Document, RecordStatus, User,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdmissionDraft {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub full_name: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "contact_number"))]
    pub contact: String,
    pub address: Option<String>,
    #[validate(length(min = 4, max = 10))]
    pub pincode: Option<String>,
    pub college_name: Option<String>,
    pub department: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub reference: Option<String>,
    #[validate(range(min = 1))]
    pub branch_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AdmissionPatch {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "contact_number"))]
    pub contact: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 4, max = 10))]
    pub pincode: Option<String>,
    pub college_name: Option<String>,
    pub department: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub reference: Option<String>,
    #[validate(range(min = 1))]
    pub branch_id: Option<i64>,
}

impl EntityWorkflow for Admission {
    type Draft = AdmissionDraft;
    type Patch = AdmissionPatch;

    fn from_draft(draft: AdmissionDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            admission_id: 0,
            full_name: draft.full_name,
            gender: draft.gender,
            dob: draft.dob,
            email: draft.email,
            contact: draft.contact,
            address: draft.address,
            pincode: draft.pincode,
            college_name: draft.college_name,
            department: draft.department,
            admission_date: draft.admission_date.or_else(|| Some(now.date_naive())),
            reference: draft.reference,
            status: RecordStatus::Active,
            branch_id: draft.branch_id,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: AdmissionPatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { full_name, contact, branch_id }
            optional {
                gender, dob, email, address, pincode, college_name, department,
                admission_date, reference,
            });
        Ok(())
    }

    fn parents(&self) -> Vec<Parent> {
        vec![Parent::Branch(self.branch_id)]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdmissionCourseDraft {
    #[validate(range(min = 1))]
    pub course_id: i64,
    #[validate(range(min = 1))]
    pub batch_id: Option<i64>,
    #[validate(range(min = 1))]
    pub admission_id: i64,
    #[validate(range(min = 1))]
    pub branch_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AdmissionCoursePatch {
    #[validate(range(min = 1))]
    pub course_id: Option<i64>,
    #[validate(range(min = 1))]
    pub batch_id: Option<i64>,
}

impl EntityWorkflow for AdmissionCourse {
    type Draft = AdmissionCourseDraft;
    type Patch = AdmissionCoursePatch;

    fn from_draft(draft: AdmissionCourseDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            adm_course_id: 0,
            course_id: draft.course_id,
            batch_id: draft.batch_id,
            admission_id: draft.admission_id,
            branch_id: draft.branch_id,
            status: RecordStatus::Active,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: AdmissionCoursePatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { course_id } optional { batch_id });
        Ok(())
    }

    fn parents(&self) -> Vec<Parent> {
        let mut parents = vec![
            Parent::Branch(self.branch_id),
            Parent::Admission(self.admission_id),
            Parent::Course(self.course_id),
        ];
        parents.extend(self.batch_id.map(Parent::Batch));
        parents
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdmissionServiceDraft {
    #[validate(range(min = 1))]
    pub service_id: i64,
    #[validate(range(min = 1))]
    pub admission_id: i64,
    #[validate(range(min = 1))]
    pub branch_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AdmissionServicePatch {
    #[validate(range(min = 1))]
    pub service_id: Option<i64>,
}

impl EntityWorkflow for AdmissionService {
    type Draft = AdmissionServiceDraft;
    type Patch = AdmissionServicePatch;

    fn from_draft(draft: AdmissionServiceDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            adm_service_id: 0,
            service_id: draft.service_id,
            admission_id: draft.admission_id,
            branch_id: draft.branch_id,
            status: RecordStatus::Active,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: AdmissionServicePatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { service_id });
        Ok(())
    }

    fn parents(&self) -> Vec<Parent> {
        vec![
            Parent::Branch(self.branch_id),
            Parent::Admission(self.admission_id),
            Parent::Service(self.service_id),
        ]
    }
}

/// A document attached to an admission. `file` is the public path returned
/// by the upload store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DocumentDraft {
    #[validate(length(max = 150), custom(function = "not_blank"))]
    pub document_name: String,
    #[validate(custom(function = "not_blank"))]
    pub file: String,
    #[validate(range(min = 1))]
    pub admission_id: i64,
    #[validate(range(min = 1))]
    pub branch_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DocumentPatch {
    #[validate(length(max = 150), custom(function = "not_blank"))]
    pub document_name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub file: Option<String>,
}

impl EntityWorkflow for Document {
    type Draft = DocumentDraft;
    type Patch = DocumentPatch;

    fn from_draft(draft: DocumentDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            document_id: 0,
            document_name: draft.document_name,
            file: draft.file,
            admission_id: draft.admission_id,
            branch_id: draft.branch_id,
            status: RecordStatus::Active,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: DocumentPatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { document_name, file });
        Ok(())
    }

    fn parents(&self) -> Vec<Parent> {
        vec![Parent::Branch(self.branch_id), Parent::Admission(self.admission_id)]
    }
}
