//! Authentication service.

use crate::dto::{LoginRequest, SuperAdminRequest};
use crate::CacheAside;
use campus_core::{CrmError, CrmResult, RecordStatus, Role, User, ValidateExt};
use campus_repository::{EntityRepository, Filter, StatusFilter};
use campus_security::{IssuedToken, PasswordHasher, SessionClaims, TokenProvider};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: IssuedToken,
    pub user: User,
}

/// Sign-in, session verification and first-run bootstrap.
pub struct AuthService {
    accessor: CacheAside<User>,
    users: Arc<dyn EntityRepository<User>>,
    password_hasher: Arc<PasswordHasher>,
    token_provider: Arc<TokenProvider>,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(
        accessor: CacheAside<User>,
        users: Arc<dyn EntityRepository<User>>,
        password_hasher: Arc<PasswordHasher>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            accessor,
            users,
            password_hasher,
            token_provider,
        }
    }

    /// Logs in an active user by email and password.
    pub async fn login(&self, request: LoginRequest) -> CrmResult<LoginOutcome> {
        debug!("Login attempt for: {}", request.email);

        request.validate_request()?;

        let user = self
            .users
            .find_one(
                &Filter::new()
                    .eq("email", request.email.as_str())
                    .with_status(StatusFilter::active()),
            )
            .await?
            .ok_or_else(|| {
                warn!("Login failed: no active user - {}", request.email);
                CrmError::unauthorized(INVALID_CREDENTIALS)
            })?;

        if !self.password_hasher.verify(&request.password, &user.password)? {
            warn!("Login failed: invalid password - {}", user.reg_id);
            return Err(CrmError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.token_provider.issue(user.reg_id, user.role)?;

        info!("User logged in: {}", user.reg_id);
        Ok(LoginOutcome { token, user })
    }

    /// Verifies a session token.
    pub fn verify_session(&self, token: &str) -> CrmResult<SessionClaims> {
        self.token_provider.verify(token)
    }

    /// The user a session belongs to, read through the cache.
    pub async fn current_user(&self, claims: &SessionClaims) -> CrmResult<User> {
        self.accessor
            .fetch_one(claims.reg_id())
            .await
            .map_err(|e| match e {
                CrmError::NotFound { .. } => CrmError::unauthorized("User no longer exists"),
                other => other,
            })
    }

    /// Creates the first super admin. Refused once one exists.
    pub async fn create_super_admin(&self, request: SuperAdminRequest) -> CrmResult<User> {
        debug!("Bootstrapping super admin: {}", request.email);

        request.validate_request()?;
        if request.password != request.confirm_password {
            return Err(CrmError::validation(
                "confirm_password: Password and confirm password do not match",
            ));
        }

        let existing = self
            .users
            .find_one(&Filter::new().eq("role", i64::from(Role::SuperAdmin.code())).live())
            .await?;
        if existing.is_some() {
            return Err(CrmError::conflict("Super admin already exists"));
        }
        if self
            .users
            .find_one(&Filter::new().eq("email", request.email.as_str()))
            .await?
            .is_some()
        {
            return Err(CrmError::conflict(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        let password = self.password_hasher.hash(&request.password)?;
        let now = Utc::now();
        let admin = User {
            reg_id: 0,
            user_name: request.user_name,
            contact: request.contact,
            email: request.email,
            password,
            branch_id: None,
            role: Role::SuperAdmin,
            status: RecordStatus::Active,
            added_by: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.accessor.create(admin).await?;
        info!("Super admin created: {}", created.reg_id);
        Ok(created)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}
