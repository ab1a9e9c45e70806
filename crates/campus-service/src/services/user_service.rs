//! Staff account service.

use crate::cache::ListScope;
use crate::dto::{UserDraft, UserPatch};
use crate::gate::{ActorGate, Parent, ParentGate, Stage};
use crate::CacheAside;
use campus_core::{CrmError, CrmResult, RecordStatus, User, ValidateExt};
use campus_repository::{EntityRepository, Filter};
use campus_security::PasswordHasher;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Registration and maintenance of staff accounts.
///
/// Returned records still carry the password hash; callers redact before
/// anything leaves the process.
pub struct UserService {
    accessor: CacheAside<User>,
    users: Arc<dyn EntityRepository<User>>,
    actors: ActorGate,
    parents: ParentGate,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        accessor: CacheAside<User>,
        users: Arc<dyn EntityRepository<User>>,
        actors: ActorGate,
        parents: ParentGate,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            accessor,
            users,
            actors,
            parents,
            hasher,
        }
    }

    pub async fn get(&self, id: i64) -> CrmResult<User> {
        debug!("Getting user: {}", id);
        self.accessor.fetch_one(id).await
    }

    pub async fn list(&self, scope: ListScope) -> CrmResult<Vec<User>> {
        debug!("Listing users by {:?}", scope);
        self.accessor.fetch_list(scope).await
    }

    pub async fn create(&self, actor_id: i64, draft: UserDraft) -> CrmResult<User> {
        debug!("Creating user: {}", draft.email);

        draft.validate_request()?;
        draft.check_passwords()?;
        let actor = self.actors.admit(actor_id).await?;

        self.ensure_email_free(&draft.email, None).await?;
        if let Some(branch_id) = draft.branch_id {
            self.parents
                .check(&[Parent::Branch(branch_id)], Stage::Create)
                .await?;
        }

        let password = self.hasher.hash(&draft.password)?;
        let now = Utc::now();
        let user = User {
            reg_id: 0,
            user_name: draft.user_name,
            contact: draft.contact,
            email: draft.email,
            password,
            branch_id: draft.branch_id,
            role: draft.role,
            status: RecordStatus::Active,
            added_by: Some(actor.reg_id),
            created_at: now,
            updated_at: now,
        };

        self.accessor.create(user).await
    }

    pub async fn update(&self, actor_id: i64, id: i64, patch: UserPatch) -> CrmResult<User> {
        debug!("Updating user: {}", id);

        patch.validate_request()?;
        patch.check_passwords()?;
        self.actors.admit(actor_id).await?;

        let current = self.accessor.find_live(id).await?;
        if let Some(email) = &patch.email {
            self.ensure_email_free(email, Some(id)).await?;
        }
        if let Some(branch_id) = patch.branch_id {
            self.parents
                .check(&[Parent::Branch(branch_id)], Stage::Update)
                .await?;
        }

        let mut next = current.clone();
        if let Some(password) = &patch.password {
            next.password = self.hasher.hash(password)?;
        }
        if let Some(user_name) = patch.user_name {
            next.user_name = user_name;
        }
        if let Some(contact) = patch.contact {
            next.contact = contact;
        }
        if let Some(email) = patch.email {
            next.email = email;
        }
        if let Some(branch_id) = patch.branch_id {
            next.branch_id = Some(branch_id);
        }
        if let Some(role) = patch.role {
            next.role = role;
        }

        self.accessor.commit_update(&current, next).await
    }

    pub async fn change_status(
        &self,
        actor_id: i64,
        id: i64,
        status: RecordStatus,
    ) -> CrmResult<User> {
        self.actors.admit(actor_id).await?;
        self.accessor.change_status(id, status).await
    }

    pub async fn delete(&self, actor_id: i64, id: i64) -> CrmResult<()> {
        self.actors.admit(actor_id).await?;
        self.accessor.soft_delete(id).await?;
        info!("User deleted: {}", id);
        Ok(())
    }

    /// Emails stay reserved by soft-deleted accounts too.
    async fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> CrmResult<()> {
        let existing = self
            .users
            .find_one(&Filter::new().eq("email", email))
            .await?;

        match existing {
            Some(user) if Some(user.reg_id) != owner => Err(CrmError::conflict(format!(
                "Email '{email}' already exists"
            ))),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}
