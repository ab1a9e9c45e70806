//! Generic CRUD service shared by every record type with a draft/patch form.

use crate::cache::{CachePolicy, ListScope};
use crate::gate::{ActorGate, Parent, ParentGate, Stage};
use crate::CacheAside;
use campus_core::{CrmResult, RecordStatus, Role, User, ValidateExt};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

/// How a record type is built and edited from request payloads.
pub trait EntityWorkflow: CachePolicy {
    type Draft: Validate + DeserializeOwned + Send + Sync + 'static;
    type Patch: Validate + DeserializeOwned + Send + Sync + 'static;

    /// Role required for writes, on top of being an active user.
    const WRITE_ROLE: Option<Role> = None;

    /// Builds a new, active record owned by `actor`.
    fn from_draft(draft: Self::Draft, actor: &User) -> CrmResult<Self>;

    fn apply_patch(&mut self, patch: Self::Patch) -> CrmResult<()>;

    /// Records this one points at.
    fn parents(&self) -> Vec<Parent> {
        Vec::new()
    }
}

/// CRUD over one record type.
///
/// Every write validates the payload, admits the actor and checks parents
/// before the accessor is touched.
pub struct RecordService<E: EntityWorkflow> {
    accessor: CacheAside<E>,
    actors: ActorGate,
    parents: ParentGate,
}

impl<E: EntityWorkflow> RecordService<E> {
    /// Creates a new record service.
    pub fn new(accessor: CacheAside<E>, actors: ActorGate, parents: ParentGate) -> Self {
        Self {
            accessor,
            actors,
            parents,
        }
    }

    #[must_use]
    pub fn accessor(&self) -> &CacheAside<E> {
        &self.accessor
    }

    pub async fn get(&self, id: i64) -> CrmResult<E> {
        debug!("Getting {}: {}", E::NAME, id);
        self.accessor.fetch_one(id).await
    }

    pub async fn list(&self, scope: ListScope) -> CrmResult<Vec<E>> {
        debug!("Listing {} by {:?}", E::NAME, scope);
        self.accessor.fetch_list(scope).await
    }

    pub async fn create(&self, actor_id: i64, draft: E::Draft) -> CrmResult<E> {
        draft.validate_request()?;
        let actor = self.admit(actor_id).await?;

        let record = E::from_draft(draft, &actor)?;
        self.parents.check(&record.parents(), Stage::Create).await?;

        self.accessor.create(record).await
    }

    pub async fn update(&self, actor_id: i64, id: i64, patch: E::Patch) -> CrmResult<E> {
        patch.validate_request()?;
        self.admit(actor_id).await?;

        let current = self.accessor.find_live(id).await?;
        let mut next = current.clone();
        next.apply_patch(patch)?;
        self.parents.check(&next.parents(), Stage::Update).await?;

        self.accessor.commit_update(&current, next).await
    }

    pub async fn change_status(
        &self,
        actor_id: i64,
        id: i64,
        status: RecordStatus,
    ) -> CrmResult<E> {
        self.admit(actor_id).await?;
        self.accessor.change_status(id, status).await
    }

    pub async fn delete(&self, actor_id: i64, id: i64) -> CrmResult<()> {
        self.admit(actor_id).await?;
        self.accessor.soft_delete(id).await
    }

    async fn admit(&self, actor_id: i64) -> CrmResult<User> {
        match E::WRITE_ROLE {
            Some(role) => self.actors.admit_with_role(actor_id, role).await,
            None => self.actors.admit(actor_id).await,
        }
    }
}

impl<E: EntityWorkflow> std::fmt::Debug for RecordService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordService")
            .field("entity", &E::NAME)
            .finish_non_exhaustive()
    }
}
