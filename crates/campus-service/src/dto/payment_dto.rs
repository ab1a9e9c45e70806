//! Payment payloads.

use crate::gate::Parent;
use crate::services::EntityWorkflow;
use campus_core::rules::{decimal_amount, not_blank};
use campus_core::{CrmError, CrmResult, Payment, PaymentCourse, PaymentService, RecordStatus, User};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentDraft {
    #[validate(range(min = 1))]
    pub admission_id: Option<i64>,
    #[validate(range(min = 1))]
    pub adm_course_id: Option<i64>,
    #[validate(range(min = 1))]
    pub adm_service_id: Option<i64>,
    pub payment_date: NaiveDate,
    #[validate(custom(function = "decimal_amount"))]
    pub amount_paid: String,
    #[validate(length(max = 30), custom(function = "not_blank"))]
    pub payment_mode: String,
    pub remark: Option<String>,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub received_by: String,
    #[validate(range(min = 1))]
    pub branch_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PaymentPatch {
    #[validate(range(min = 1))]
    pub adm_course_id: Option<i64>,
    #[validate(range(min = 1))]
    pub adm_service_id: Option<i64>,
    pub payment_date: Option<NaiveDate>,
    #[validate(custom(function = "decimal_amount"))]
    pub amount_paid: Option<String>,
    #[validate(length(max = 30), custom(function = "not_blank"))]
    pub payment_mode: Option<String>,
    pub remark: Option<String>,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub received_by: Option<String>,
}

/// A payment settles exactly one enrolment: a course or a service.
fn check_single_target(payment: &Payment) -> CrmResult<()> {
    match (payment.adm_course_id, payment.adm_service_id) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        _ => Err(CrmError::conflict(
            "Payment must reference either an admission course or an admission service, not both",
        )),
    }
}

impl EntityWorkflow for Payment {
    type Draft = PaymentDraft;
    type Patch = PaymentPatch;

    fn from_draft(draft: PaymentDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        let payment = Self {
            payment_id: 0,
            admission_id: draft.admission_id,
            adm_course_id: draft.adm_course_id,
            adm_service_id: draft.adm_service_id,
            payment_date: draft.payment_date,
            amount_paid: draft.amount_paid,
            payment_mode: draft.payment_mode,
            remark: draft.remark,
            received_by: draft.received_by,
            status: RecordStatus::Active,
            branch_id: draft.branch_id,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        };
        check_single_target(&payment)?;
        Ok(payment)
    }

    /// Switching target kind is a replacement: setting one id clears the other.
    fn apply_patch(&mut self, patch: PaymentPatch) -> CrmResult<()> {
        match (patch.adm_course_id, patch.adm_service_id) {
            (Some(_), Some(_)) => {
                return Err(CrmError::conflict(
                    "Payment must reference either an admission course or an admission service, not both",
                ));
            }
            (Some(course), None) => {
                self.adm_course_id = Some(course);
                self.adm_service_id = None;
            }
            (None, Some(service)) => {
                self.adm_service_id = Some(service);
                self.adm_course_id = None;
            }
            (None, None) => {}
        }

        let record = &mut *self;
        apply_patch!(record, patch { payment_date, amount_paid, payment_mode, received_by }
            optional { remark });
        check_single_target(self)
    }

    fn parents(&self) -> Vec<Parent> {
        let mut parents = Vec::with_capacity(3);
        parents.extend(self.branch_id.map(Parent::Branch));
        parents.extend(self.admission_id.map(Parent::Admission));
        parents.extend(self.adm_course_id.map(Parent::AdmissionCourse));
        parents.extend(self.adm_service_id.map(Parent::AdmissionService));
        parents
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentCourseDraft {
    #[validate(range(min = 1))]
    pub admission_id: i64,
    #[validate(range(min = 1))]
    pub adm_course_id: i64,
    #[validate(range(min = 1))]
    pub section_id: Option<i64>,
    pub payment_date: NaiveDate,
    #[validate(custom(function = "decimal_amount"))]
    pub amount_paid: String,
    #[validate(length(max = 30), custom(function = "not_blank"))]
    pub payment_mode: String,
    pub remark: Option<String>,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub received_by: String,
    #[validate(range(min = 1))]
    pub branch_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentServiceDraft {
    #[validate(range(min = 1))]
    pub admission_id: i64,
    #[validate(range(min = 1))]
    pub adm_service_id: i64,
    #[validate(range(min = 1))]
    pub section_id: Option<i64>,
    pub payment_date: NaiveDate,
    #[validate(custom(function = "decimal_amount"))]
    pub amount_paid: String,
    #[validate(length(max = 30), custom(function = "not_blank"))]
    pub payment_mode: String,
    pub remark: Option<String>,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub received_by: String,
    #[validate(range(min = 1))]
    pub branch_id: i64,
}

/// Editable fields shared by course and service payments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InstalmentPatch {
    #[validate(range(min = 1))]
    pub section_id: Option<i64>,
    pub payment_date: Option<NaiveDate>,
    #[validate(custom(function = "decimal_amount"))]
    pub amount_paid: Option<String>,
    #[validate(length(max = 30), custom(function = "not_blank"))]
    pub payment_mode: Option<String>,
    pub remark: Option<String>,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub received_by: Option<String>,
}

impl EntityWorkflow for PaymentCourse {
    type Draft = PaymentCourseDraft;
    type Patch = InstalmentPatch;

    fn from_draft(draft: PaymentCourseDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            pay_course_id: 0,
            admission_id: draft.admission_id,
            adm_course_id: draft.adm_course_id,
            section_id: draft.section_id,
            payment_date: draft.payment_date,
            amount_paid: draft.amount_paid,
            payment_mode: draft.payment_mode,
            remark: draft.remark,
            received_by: draft.received_by,
            status: RecordStatus::Active,
            branch_id: draft.branch_id,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: InstalmentPatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { payment_date, amount_paid, payment_mode, received_by }
            optional { section_id, remark });
        Ok(())
    }

    fn parents(&self) -> Vec<Parent> {
        let mut parents = vec![
            Parent::Branch(self.branch_id),
            Parent::Admission(self.admission_id),
            Parent::AdmissionCourse(self.adm_course_id),
        ];
        parents.extend(self.section_id.map(Parent::Section));
        parents
    }
}

impl EntityWorkflow for PaymentService {
    type Draft = PaymentServiceDraft;
    type Patch = InstalmentPatch;

    fn from_draft(draft: PaymentServiceDraft, actor: &User) -> CrmResult<Self> {
        let now = Utc::now();
        Ok(Self {
            pay_service_id: 0,
            admission_id: draft.admission_id,
            adm_service_id: draft.adm_service_id,
            section_id: draft.section_id,
            payment_date: draft.payment_date,
            amount_paid: draft.amount_paid,
            payment_mode: draft.payment_mode,
            remark: draft.remark,
            received_by: draft.received_by,
            status: RecordStatus::Active,
            branch_id: draft.branch_id,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: InstalmentPatch) -> CrmResult<()> {
        let record = self;
        apply_patch!(record, patch { payment_date, amount_paid, payment_mode, received_by }
            optional { section_id, remark });
        Ok(())
    }

    fn parents(&self) -> Vec<Parent> {
        let mut parents = vec![
            Parent::Branch(self.branch_id),
            Parent::Admission(self.admission_id),
            Parent::AdmissionService(self.adm_service_id),
        ];
        parents.extend(self.section_id.map(Parent::Section));
        parents
    }
}
