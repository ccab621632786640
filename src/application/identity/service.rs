//! Authentication service: application-layer orchestration
//!
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::{DomainError, DomainResult, NewUser, User, UserRepository, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig, TokenClaims};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Result of a successful login or registration
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            users,
            jwt_config,
            bcrypt_cost,
        }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username or email plus password.
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub async fn login(&self, login: &str, password: &str) -> DomainResult<AuthResult> {
        if login.trim().is_empty() || password.is_empty() {
            return Err(DomainError::validation(
                "Username and password are required",
            ));
        }

        let Some(user) = self.users.find_by_login(login.trim()).await? else {
            debug!(login, "Login for unknown user");
            return Err(DomainError::AuthenticationFailed);
        };

        if !check_password(password, &user.password_hash).await? {
            debug!(user_id = %user.id, "Login with wrong password");
            return Err(DomainError::AuthenticationFailed);
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(AuthResult { token, user })
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new agent and log them in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthResult> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(DomainError::validation(
                "Username, email, and password are required",
            ));
        }

        if self.users.find_conflicting(username, email).await?.is_some() {
            return Err(DomainError::Conflict(
                "Username or email already taken".into(),
            ));
        }

        let password_hash = hash_blocking(password.to_string(), self.bcrypt_cost).await?;
        let user = self
            .users
            .insert(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role: UserRole::Agent,
            })
            .await?;

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(AuthResult { token, user })
    }

    // ── Tokens ──────────────────────────────────────────────────

    /// Decode a bearer token. Any failure is reported as `Forbidden`.
    pub fn verify(&self, token: &str) -> DomainResult<TokenClaims> {
        verify_token(token, &self.jwt_config).map_err(|e| {
            debug!(error = %e, "Token rejected");
            DomainError::Forbidden("Token is invalid or expired".into())
        })
    }

    fn issue_token(&self, user: &User) -> DomainResult<String> {
        create_token(&user.id, &user.username, user.role, &self.jwt_config).map_err(|e| {
            error!(error = %e, "Failed to sign token");
            DomainError::Internal(format!("Failed to create token: {}", e))
        })
    }
}

/// bcrypt is CPU-bound; keep it off the async workers.
pub(crate) async fn hash_blocking(password: String, cost: u32) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| DomainError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
}

async fn check_password(password: &str, hash: &str) -> DomainResult<bool> {
    let (password, hash) = (password.to_string(), hash.to_string());
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| DomainError::Internal(format!("Verification task failed: {}", e)))?;

    // A corrupt stored hash is treated as a mismatch
    Ok(verified.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::SeaOrmUserRepository;
    use crate::test_support::test_db;

    async fn service() -> AuthService {
        let users = Arc::new(SeaOrmUserRepository::new(test_db().await));
        AuthService::new(
            users,
            JwtConfig {
                secret: "test-secret".into(),
                expiration_hours: 24,
                issuer: "imf-test".into(),
            },
            4,
        )
    }

    #[tokio::test]
    async fn register_then_login_by_username_and_email() {
        let svc = service().await;
        let registered = svc
            .register("ethan", "ethan.hunt@imf.gov", "mission-impossible")
            .await
            .unwrap();
        assert_eq!(registered.user.role, UserRole::Agent);

        let by_name = svc.login("ethan", "mission-impossible").await.unwrap();
        let by_email = svc
            .login("ethan.hunt@imf.gov", "mission-impossible")
            .await
            .unwrap();
        assert_eq!(by_name.user.id, registered.user.id);
        assert_eq!(by_email.user.id, registered.user.id);

        let claims = svc.verify(&by_name.token).unwrap();
        assert_eq!(claims.username, "ethan");
        assert_eq!(claims.role, UserRole::Agent);
        assert_eq!(claims.user_id, registered.user.id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let svc = service().await;
        svc.register("benji", "benji@imf.gov", "pass").await.unwrap();

        let wrong = svc.login("benji", "nope").await.unwrap_err();
        let unknown = svc.login("nobody", "pass").await.unwrap_err();
        assert_eq!(wrong, DomainError::AuthenticationFailed);
        assert_eq!(unknown, DomainError::AuthenticationFailed);
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let svc = service().await;
        svc.register("luther", "luther@imf.gov", "pass").await.unwrap();

        let same_name = svc.register("luther", "x@imf.gov", "pass").await.unwrap_err();
        let same_email = svc.register("other", "luther@imf.gov", "pass").await.unwrap_err();
        assert!(matches!(same_name, DomainError::Conflict(_)));
        assert!(matches!(same_email, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_fields_are_validation_errors() {
        let svc = service().await;
        assert!(matches!(
            svc.login("", "pw").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.register("a", "  ", "pw").await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn tampered_token_is_forbidden() {
        let svc = service().await;
        let auth = svc.register("ilsa", "ilsa@imf.gov", "pass").await.unwrap();
        let tampered = format!("{}x", auth.token);
        assert!(matches!(svc.verify(&tampered), Err(DomainError::Forbidden(_))));
    }
}
