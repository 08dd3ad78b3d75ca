//! User service - Administration, self-service profile and promotion.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{MSG_CHURCH_NOT_FOUND, MSG_EMAIL_IN_USE, MSG_USER_NOT_FOUND};
use crate::domain::{
    normalize_email, AdminStats, NewUser, Password, SafeUser, User, UserChanges, UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{ChurchRepository, UserRepository};

/// Admin-side account creation.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub church_id: Option<Uuid>,
    pub is_leader: bool,
    pub is_admin: bool,
}

/// Admin-side account edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub church_id: Option<Option<Uuid>>,
    pub is_leader: Option<bool>,
    pub is_admin: Option<bool>,
}

/// Self-service profile edit.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users ordered by name
    async fn list_users(&self) -> AppResult<Vec<SafeUser>>;

    /// Get a single user
    async fn get_user(&self, id: Uuid) -> AppResult<SafeUser>;

    /// Create an account on behalf of an administrator
    async fn create_user(&self, input: CreateUserInput) -> AppResult<SafeUser>;

    /// Edit an account on behalf of an administrator
    async fn update_user(&self, id: Uuid, input: UpdateUserInput) -> AppResult<SafeUser>;

    /// Delete an account; `actor_id` may not delete itself
    async fn delete_user(&self, actor_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Update the signed-in user's own profile
    async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> AppResult<SafeUser>;

    /// Set `isAdmin` on the account with this email
    async fn promote_to_admin(&self, email: &str) -> AppResult<SafeUser>;

    /// Aggregate counters for the admin overview
    async fn stats(&self) -> AppResult<AdminStats>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    churches: Arc<dyn ChurchRepository>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>, churches: Arc<dyn ChurchRepository>) -> Self {
        Self { users, churches }
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<Uuid>) -> AppResult<()> {
        match self.users.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(AppError::conflict(MSG_EMAIL_IN_USE))
            }
            _ => Ok(()),
        }
    }

    async fn ensure_church_exists(&self, church_id: Option<Uuid>) -> AppResult<()> {
        if let Some(id) = church_id {
            if self.churches.find_by_id(id).await?.is_none() {
                return Err(AppError::validation(MSG_CHURCH_NOT_FOUND));
            }
        }
        Ok(())
    }

    async fn load(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found(MSG_USER_NOT_FOUND)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<SafeUser>> {
        let users = self.users.list().await?;
        Ok(users.iter().map(SafeUser::from).collect())
    }

    async fn get_user(&self, id: Uuid) -> AppResult<SafeUser> {
        self.load(id).await.map(SafeUser::from)
    }

    async fn create_user(&self, input: CreateUserInput) -> AppResult<SafeUser> {
        let email = normalize_email(&input.email);
        self.ensure_email_free(&email, None).await?;
        self.ensure_church_exists(input.church_id).await?;

        let password_hash = Password::new(&input.password)?.into_string();
        let user = self
            .users
            .create(NewUser {
                email,
                name: input.name.trim().to_string(),
                password_hash: Some(password_hash),
                role: input.role,
                is_admin: input.is_admin,
                is_leader: input.is_leader,
                church_id: input.church_id,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User created by administrator");
        Ok(SafeUser::from(&user))
    }

    async fn update_user(&self, id: Uuid, input: UpdateUserInput) -> AppResult<SafeUser> {
        self.load(id).await?;

        let email = input.email.as_deref().map(normalize_email);
        if let Some(email) = &email {
            self.ensure_email_free(email, Some(id)).await?;
        }
        if let Some(church_id) = input.church_id {
            self.ensure_church_exists(church_id).await?;
        }
        let password_hash = match input.password.as_deref().filter(|p| !p.is_empty()) {
            Some(plain) => Some(Password::new(plain)?.into_string()),
            None => None,
        };

        let changes = UserChanges {
            email,
            name: input.name.map(|n| n.trim().to_string()),
            password_hash,
            image: None,
            role: input.role,
            is_admin: input.is_admin,
            is_leader: input.is_leader,
            church_id: input.church_id,
        };

        let user = self.users.update(id, changes).await?;
        tracing::info!(user_id = %id, "User updated by administrator");
        Ok(SafeUser::from(&user))
    }

    async fn delete_user(&self, actor_id: Uuid, id: Uuid) -> AppResult<()> {
        if actor_id == id {
            return Err(AppError::validation(
                "Você não pode excluir sua própria conta",
            ));
        }

        self.users.delete(id).await?;
        tracing::info!(user_id = %id, actor_id = %actor_id, "User deleted");
        Ok(())
    }

    async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> AppResult<SafeUser> {
        let current = self.load(user_id).await?;

        let email = update
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| *e != current.email);
        if let Some(email) = &email {
            self.ensure_email_free(email, Some(user_id)).await?;
        }

        let password_hash = match update.new_password.as_deref().filter(|p| !p.is_empty()) {
            Some(new_password) => {
                let supplied = update.current_password.as_deref().unwrap_or_default();
                let matches = current
                    .password_hash
                    .clone()
                    .map(Password::from_hash)
                    .is_some_and(|stored| stored.verify(supplied));
                if !matches {
                    return Err(AppError::validation("Senha atual incorreta"));
                }
                Some(Password::new(new_password)?.into_string())
            }
            None => None,
        };

        let changes = UserChanges {
            email,
            name: update.name.map(|n| n.trim().to_string()),
            password_hash,
            image: update.image.filter(|i| !i.is_empty()).map(Some),
            ..UserChanges::default()
        };

        let user = self.users.update(user_id, changes).await?;
        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(SafeUser::from(&user))
    }

    async fn promote_to_admin(&self, email: &str) -> AppResult<SafeUser> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_not_found(MSG_USER_NOT_FOUND)?;

        let changes = UserChanges {
            is_admin: Some(true),
            ..UserChanges::default()
        };
        let user = self.users.update(user.id, changes).await?;

        tracing::warn!(user_id = %user.id, "User promoted to administrator");
        Ok(SafeUser::from(&user))
    }

    async fn stats(&self) -> AppResult<AdminStats> {
        let (users, churches, users_by_role) = tokio::try_join!(
            self.users.count(),
            self.churches.count(),
            self.users.count_by_role(),
        )?;

        Ok(AdminStats {
            users,
            churches,
            users_by_role,
        })
    }
}
