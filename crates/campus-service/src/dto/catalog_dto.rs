//! Course, batch and service payloads.

use crate::gate::Parent;
use crate::services::EntityWorkflow;
use campus_core::rules::not_blank;
use campus_core::{Batch, Course, CrmResult, RecordStatus, ServiceOffering, User};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CourseDraft {
    #[validate(length(max = 150), custom(function = "not_blank"))]
    pub course_name: String,
    #[validate(length(max = 30))]
    pub course_code: Option<String>,
    pub duration: Option<String>,
    pub fees: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub certificate_offered: Option<String>,
    #[validate(range(min = 1))]
    pub branch_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CoursePatch {
    #[validate(length(max = 150), custom(function = "not_blank"))]
    pub course_name: Option<String>,
    #[validate(length(max = 30))]
    pub course_code: Option<String>,
    pub duration: Option<String>,
    pub fees: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub certificate_offered: Option<String>,
    #[validate(range(min = 1))]
    pub branch_id: Option<i64>,
}

impl EntityWorkflow for Course {
    type Draft = CourseDraft;
    type Patch = CoursePatch;

    fn from_draft(draft: CourseDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            course_id: 0,
            course_name: draft.course_name,
            course_code: draft.course_code,
            duration: draft.duration,
            fees: draft.fees,
            subject: draft.subject,
            description: draft.description,
            certificate_offered: draft.certificate_offered,
            status: RecordStatus::Active,
            branch_id: draft.branch_id,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: CoursePatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { course_name, branch_id }
            optional {
                course_code, duration, fees, subject, description, certificate_offered,
            });
        Ok(())
    }

    fn parents(&self) -> Vec<Parent> {
        vec![Parent::Branch(self.branch_id)]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchDraft {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub batch_name: String,
    pub batch_code: Option<String>,
    #[validate(range(min = 1))]
    pub course_id: i64,
    pub batch_time: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub teacher_name: Option<String>,
    #[validate(range(min = 1))]
    pub branch_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BatchPatch {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub batch_name: Option<String>,
    pub batch_code: Option<String>,
    #[validate(range(min = 1))]
    pub course_id: Option<i64>,
    pub batch_time: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub teacher_name: Option<String>,
    #[validate(range(min = 1))]
    pub branch_id: Option<i64>,
}

impl EntityWorkflow for Batch {
    type Draft = BatchDraft;
    type Patch = BatchPatch;

    fn from_draft(draft: BatchDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            batch_id: 0,
            batch_name: draft.batch_name,
            batch_code: draft.batch_code,
            course_id: draft.course_id,
            batch_time: draft.batch_time,
            start_date: draft.start_date,
            teacher_name: draft.teacher_name,
            status: RecordStatus::Active,
            branch_id: draft.branch_id,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: BatchPatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { batch_name, course_id, branch_id }
            optional { batch_code, batch_time, start_date, teacher_name });
        Ok(())
    }

    fn parents(&self) -> Vec<Parent> {
        vec![Parent::Branch(self.branch_id), Parent::Course(self.course_id)]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceDraft {
    #[validate(length(max = 150), custom(function = "not_blank"))]
    pub service_name: String,
    pub service_details: Option<String>,
    #[validate(range(min = 1))]
    pub branch_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ServicePatch {
    #[validate(length(max = 150), custom(function = "not_blank"))]
    pub service_name: Option<String>,
    pub service_details: Option<String>,
    #[validate(range(min = 1))]
    pub branch_id: Option<i64>,
}

impl EntityWorkflow for ServiceOffering {
    type Draft = ServiceDraft;
    type Patch = ServicePatch;

    fn from_draft(draft: ServiceDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            service_id: 0,
            service_name: draft.service_name,
            service_details: draft.service_details,
            status: RecordStatus::Active,
            branch_id: draft.branch_id,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: ServicePatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { service_name, branch_id } optional { service_details });
        Ok(())
    }

    fn parents(&self) -> Vec<Parent> {
        vec![Parent::Branch(self.branch_id)]
    }
}
