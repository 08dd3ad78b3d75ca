//! Authentication service - Registration and credential login.

use std::sync::Arc;

use async_trait::async_trait;

use super::token_service::TokenService;
use crate::config::MSG_EMAIL_IN_USE;
use crate::domain::{normalize_email, NewUser, Password, SafeUser, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Composite compared against when the account is unknown, so both paths
/// do the same hashing work.
const DUMMY_DIGEST: &str = "00000000000000000000000000000000:\
     0000000000000000000000000000000000000000000000000000000000000000";

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub user: SafeUser,
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Self-register a new account with the default role
    async fn register(&self, name: String, email: String, password: String) -> AppResult<SafeUser>;

    /// Check credentials and issue a session token
    async fn login(&self, email: String, password: String) -> AppResult<LoginSession>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, name: String, email: String, password: String) -> AppResult<SafeUser> {
        let email = normalize_email(&email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(MSG_EMAIL_IN_USE));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .users
            .create(NewUser {
                email,
                name: name.trim().to_string(),
                password_hash: Some(password_hash),
                role: UserRole::User,
                is_admin: false,
                is_leader: false,
                church_id: None,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(SafeUser::from(&user))
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginSession> {
        let user = self.users.find_by_email(&email).await?;

        let stored = user
            .as_ref()
            .and_then(|u| u.password_hash.as_deref())
            .unwrap_or(DUMMY_DIGEST);
        let password_valid = Password::from_hash(stored.to_string()).verify(&password);

        let user = match user {
            Some(user) if password_valid && user.password_hash.is_some() => user,
            _ => {
                tracing::warn!("Login failed: invalid credentials");
                return Err(AppError::InvalidCredentials);
            }
        };

        let safe = SafeUser::from(&user);
        let token = self.tokens.issue(&safe)?;
        tracing::info!(user_id = %safe.id, "User logged in");

        Ok(LoginSession { user: safe, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infra::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(b"auth-service-test-secret-32bytes"))
    }

    fn stored_user(email: &str, password: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: "Stored".into(),
            password_hash: password.map(crate::domain::hash_password),
            image: None,
            role: UserRole::MediaChurch,
            is_admin: false,
            is_leader: true,
            church_id: None,
            church: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("a@b.com"))
            .returning(|email| Ok(Some(stored_user(email, Some("correct")))));

        let tokens = tokens();
        let service = Authenticator::new(Arc::new(repo), tokens.clone());
        let session = service
            .login("a@b.com".into(), "correct".into())
            .await
            .unwrap();

        assert_eq!(session.user.email, "a@b.com");
        let claims = tokens.verify(&session.token).unwrap();
        assert_eq!(claims.user, session.user);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email, Some("correct")))));

        let service = Authenticator::new(Arc::new(repo), tokens());
        let result = service.login("a@b.com".into(), "wrong".into()).await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = Authenticator::new(Arc::new(repo), tokens());
        let result = service.login("ghost@b.com".into(), "whatever".into()).await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_account_without_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email, None))));

        let service = Authenticator::new(Arc::new(repo), tokens());
        let result = service.login("a@b.com".into(), "".into()).await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("taken@b.com"))
            .returning(|email| Ok(Some(stored_user(email, Some("x")))));
        repo.expect_create().never();

        let service = Authenticator::new(Arc::new(repo), tokens());
        let result = service
            .register("Ana".into(), " Taken@B.com ".into(), "secret1".into())
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_creates_ordinary_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| {
                new_user.role == UserRole::User
                    && !new_user.is_admin
                    && new_user.email == "new@b.com"
                    && new_user
                        .password_hash
                        .as_deref()
                        .is_some_and(|h| crate::domain::verify_password(h, "secret1"))
            })
            .returning(|new_user| {
                let mut user = stored_user(&new_user.email, None);
                user.role = new_user.role;
                user.password_hash = new_user.password_hash;
                Ok(user)
            });

        let service = Authenticator::new(Arc::new(repo), tokens());
        let user = service
            .register("Novo".into(), "New@B.com".into(), "secret1".into())
            .await
            .unwrap();

        assert_eq!(user.email, "new@b.com");
        assert_eq!(user.role, UserRole::User);
    }
}
