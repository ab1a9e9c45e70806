//! Unified payment view across course and service payments.

use crate::cache::ListScope;
use crate::CacheAside;
use campus_core::{CrmResult, PaymentCourse, PaymentService};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One payment in the merged ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEntry {
    Course(PaymentCourse),
    Service(PaymentService),
}

impl LedgerEntry {
    #[must_use]
    pub fn amount_paid(&self) -> &str {
        match self {
            Self::Course(payment) => &payment.amount_paid,
            Self::Service(payment) => &payment.amount_paid,
        }
    }

    const fn sort_key(&self) -> (NaiveDate, u8, i64) {
        match self {
            Self::Course(payment) => (payment.payment_date, 0, payment.pay_course_id),
            Self::Service(payment) => (payment.payment_date, 1, payment.pay_service_id),
        }
    }
}

/// Merges course and service payments at query time.
///
/// Each side is read through its own accessor and list keys; the merged
/// result is never cached, so it has no invalidation of its own.
#[derive(Debug, Clone)]
pub struct PaymentLedger {
    courses: CacheAside<PaymentCourse>,
    services: CacheAside<PaymentService>,
}

impl PaymentLedger {
    pub fn new(courses: CacheAside<PaymentCourse>, services: CacheAside<PaymentService>) -> Self {
        Self { courses, services }
    }

    pub async fn by_branch(&self, branch_id: i64) -> CrmResult<Vec<LedgerEntry>> {
        debug!("Ledger for branch {}", branch_id);
        self.merged(ListScope::by("branch_id", branch_id)).await
    }

    /// Empty for an admission without payments.
    pub async fn by_admission(&self, admission_id: i64) -> CrmResult<Vec<LedgerEntry>> {
        debug!("Ledger for admission {}", admission_id);
        self.merged(ListScope::by("admission_id", admission_id)).await
    }

    async fn merged(&self, scope: ListScope) -> CrmResult<Vec<LedgerEntry>> {
        let (courses, services) = tokio::try_join!(
            self.courses.fetch_list(scope),
            self.services.fetch_list(scope)
        )?;

        let mut entries: Vec<LedgerEntry> = courses
            .into_iter()
            .map(LedgerEntry::Course)
            .chain(services.into_iter().map(LedgerEntry::Service))
            .collect();
        entries.sort_by_key(LedgerEntry::sort_key);
        Ok(entries)
    }
}
