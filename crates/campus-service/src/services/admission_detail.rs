//! Admission profile with its documents, courses and services.

use crate::cache::ListScope;
use crate::CacheAside;
use campus_core::{Admission, AdmissionCourse, AdmissionService, CrmResult, Document};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An admission together with the records attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionDetail {
    #[serde(flatten)]
    pub admission: Admission,
    pub documents: Vec<Document>,
    pub courses: Vec<AdmissionCourse>,
    pub services: Vec<AdmissionService>,
}

/// Assembles [`AdmissionDetail`] views at query time.
///
/// Each part is read through its own accessor and `*_admission_<id>` list
/// key. The assembled view is not cached, so a write to any part shows up
/// on the next read without extra invalidation.
#[derive(Debug, Clone)]
pub struct AdmissionDetails {
    admissions: CacheAside<Admission>,
    documents: CacheAside<Document>,
    courses: CacheAside<AdmissionCourse>,
    services: CacheAside<AdmissionService>,
}

impl AdmissionDetails {
    pub fn new(
        admissions: CacheAside<Admission>,
        documents: CacheAside<Document>,
        courses: CacheAside<AdmissionCourse>,
        services: CacheAside<AdmissionService>,
    ) -> Self {
        Self {
            admissions,
            documents,
            courses,
            services,
        }
    }

    pub async fn get(&self, admission_id: i64) -> CrmResult<AdmissionDetail> {
        debug!("Admission detail for {}", admission_id);
        let admission = self.admissions.fetch_one(admission_id).await?;
        self.attach(admission).await
    }

    /// Every live admission of a branch, each with its attachments.
    pub async fn by_branch(&self, branch_id: i64) -> CrmResult<Vec<AdmissionDetail>> {
        debug!("Admission details for branch {}", branch_id);
        let admissions = self
            .admissions
            .fetch_list(ListScope::by("branch_id", branch_id))
            .await?;

        let mut details = Vec::with_capacity(admissions.len());
        for admission in admissions {
            details.push(self.attach(admission).await?);
        }
        Ok(details)
    }

    async fn attach(&self, admission: Admission) -> CrmResult<AdmissionDetail> {
        let scope = ListScope::by("admission_id", admission.admission_id);
        let (documents, courses, services) = tokio::try_join!(
            self.documents.fetch_list(scope),
            self.courses.fetch_list(scope),
            self.services.fetch_list(scope)
        )?;

        Ok(AdmissionDetail {
            admission,
            documents,
            courses,
            services,
        })
    }
}
