//! Checks that run before any write.

use crate::Repositories;
use campus_core::{
    Admission, AdmissionCourse, AdmissionService, Batch, Branch, Course, CrmError, CrmResult,
    Entity, RecordStatus, Role, Section, ServiceOffering, User,
};
use campus_repository::{EntityRepository, Filter, StatusFilter};
use std::sync::Arc;
use tracing::warn;

/// Resolves the acting user of a request.
#[derive(Clone)]
pub struct ActorGate {
    users: Arc<dyn EntityRepository<User>>,
}

impl ActorGate {
    pub fn new(users: Arc<dyn EntityRepository<User>>) -> Self {
        Self { users }
    }

    /// Loads the acting user, who must exist and be active.
    pub async fn admit(&self, reg_id: i64) -> CrmResult<User> {
        let actor = self
            .users
            .find_one(&Filter::by_id::<User>(reg_id))
            .await?;

        match actor {
            Some(user) if user.status.is_active() => Ok(user),
            Some(user) => {
                warn!(reg_id, status = %user.status, "Rejected request from non-active user");
                Err(CrmError::unauthorized("Unauthorized user"))
            }
            None => {
                warn!(reg_id, "Rejected request from unknown user");
                Err(CrmError::unauthorized("Unauthorized user"))
            }
        }
    }

    /// Like [`admit`](Self::admit), and the user must hold `role`.
    pub async fn admit_with_role(&self, reg_id: i64, role: Role) -> CrmResult<User> {
        let actor = self.admit(reg_id).await?;
        if actor.role != role {
            warn!(reg_id, role = %actor.role, required = %role, "Rejected request for role");
            return Err(CrmError::unauthorized(format!("Only {role} can perform this action")));
        }
        Ok(actor)
    }
}

impl std::fmt::Debug for ActorGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorGate").finish_non_exhaustive()
    }
}

/// A record another record points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    Branch(i64),
    Section(i64),
    Course(i64),
    Batch(i64),
    Service(i64),
    Admission(i64),
    AdmissionCourse(i64),
    AdmissionService(i64),
}

/// Which write a parent is checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// New records only attach to active parents.
    Create,
    /// Existing records may keep pointing at inactive parents.
    Update,
}

impl Stage {
    fn allowed(self) -> StatusFilter {
        match self {
            Self::Create => StatusFilter::active(),
            Self::Update => StatusFilter::In(vec![RecordStatus::Active, RecordStatus::Inactive]),
        }
    }
}

/// Verifies that referenced parents exist in an acceptable status.
#[derive(Clone)]
pub struct ParentGate {
    branches: Arc<dyn EntityRepository<Branch>>,
    sections: Arc<dyn EntityRepository<Section>>,
    courses: Arc<dyn EntityRepository<Course>>,
    batches: Arc<dyn EntityRepository<Batch>>,
    services: Arc<dyn EntityRepository<ServiceOffering>>,
    admissions: Arc<dyn EntityRepository<Admission>>,
    admission_courses: Arc<dyn EntityRepository<AdmissionCourse>>,
    admission_services: Arc<dyn EntityRepository<AdmissionService>>,
}

impl ParentGate {
    #[must_use]
    pub fn new(repos: &Repositories) -> Self {
        Self {
            branches: Arc::clone(&repos.branches),
            sections: Arc::clone(&repos.sections),
            courses: Arc::clone(&repos.courses),
            batches: Arc::clone(&repos.batches),
            services: Arc::clone(&repos.services),
            admissions: Arc::clone(&repos.admissions),
            admission_courses: Arc::clone(&repos.admission_courses),
            admission_services: Arc::clone(&repos.admission_services),
        }
    }

    /// Fails with NotFound on the first missing or unacceptable parent.
    pub async fn check(&self, parents: &[Parent], stage: Stage) -> CrmResult<()> {
        for parent in parents {
            match *parent {
                Parent::Branch(id) => present(self.branches.as_ref(), id, stage).await?,
                Parent::Section(id) => present(self.sections.as_ref(), id, stage).await?,
                Parent::Course(id) => present(self.courses.as_ref(), id, stage).await?,
                Parent::Batch(id) => present(self.batches.as_ref(), id, stage).await?,
                Parent::Service(id) => present(self.services.as_ref(), id, stage).await?,
                Parent::Admission(id) => present(self.admissions.as_ref(), id, stage).await?,
                Parent::AdmissionCourse(id) => {
                    present(self.admission_courses.as_ref(), id, stage).await?;
                }
                Parent::AdmissionService(id) => {
                    present(self.admission_services.as_ref(), id, stage).await?;
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ParentGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParentGate").finish_non_exhaustive()
    }
}

async fn present<E: Entity>(
    repository: &dyn EntityRepository<E>,
    id: i64,
    stage: Stage,
) -> CrmResult<()> {
    let filter = Filter::by_id::<E>(id).with_status(stage.allowed());
    match repository.find_one(&filter).await? {
        Some(_) => Ok(()),
        None => Err(CrmError::not_found(E::NAME, id)),
    }
}
