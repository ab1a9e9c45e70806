//! Session token provider for issuing and verifying tokens.

use super::SessionClaims;
use campus_config::SecurityConfig;
use campus_core::{CrmError, CrmResult, Role};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, warn};

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
    /// Lifetime in seconds, used as the cookie max-age.
    pub max_age_secs: i64,
}

/// HS256 session token provider.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: &SecurityConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            ttl_secs: i64::try_from(config.token_ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// Issues a session token for a user.
    pub fn issue(&self, reg_id: i64, role: Role) -> CrmResult<IssuedToken> {
        let expires_at = Utc::now() + Duration::seconds(self.ttl_secs);
        let claims = SessionClaims::new(reg_id, role, expires_at);

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| CrmError::Internal(format!("Failed to sign session token: {e}")))?;

        debug!("Issued session token for user {}", reg_id);
        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
            max_age_secs: self.ttl_secs,
        })
    }

    /// Verifies a token and returns its claims.
    pub fn verify(&self, token: &str) -> CrmResult<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                warn!("Session token rejected: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        CrmError::unauthorized("Session expired. Please sign in again.")
                    }
                    _ => CrmError::unauthorized("Invalid session token."),
                }
            },
        )?;

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(secret: &str, ttl: u64) -> TokenProvider {
        TokenProvider::new(&SecurityConfig {
            jwt_secret: secret.to_string(),
            token_ttl_secs: ttl,
            ..Default::default()
        })
    }

    #[test]
    fn test_issue_and_verify() {
        let provider = provider("test-secret-key-for-testing-only", 3600);
        let issued = provider.issue(12, Role::Admin).unwrap();

        let claims = provider.verify(&issued.token).unwrap();
        assert_eq!(claims.reg_id(), 12);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(issued.max_age_secs, 3600);
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let issued = provider("secret-a", 3600).issue(1, Role::User).unwrap();
        let err = provider("secret-b", 3600).verify(&issued.token).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = provider("secret", 3600).verify("not.a.token").unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }
}
