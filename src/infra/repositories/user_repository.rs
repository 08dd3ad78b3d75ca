//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::church::Entity as ChurchEntity;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::{MSG_EMAIL_IN_USE, MSG_USER_NOT_FOUND};
use crate::domain::{normalize_email, MemberSummary, NewUser, RoleCount, User, UserChanges, UserRole};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Emails are stored normalized; lookups normalize their input.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID, with its church summary
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address (case-insensitive)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply a partial update
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Delete user by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List all users ordered by name
    async fn list(&self) -> AppResult<Vec<User>>;

    /// List members of a church
    async fn list_by_church(&self, church_id: Uuid) -> AppResult<Vec<MemberSummary>>;

    /// Count all users
    async fn count(&self) -> AppResult<u64>;

    /// Count users grouped by role
    async fn count_by_role(&self) -> AppResult<Vec<RoleCount>>;
}

/// A unique-index hit on write can only be the email column.
fn write_error(err: DbErr) -> AppError {
    let sql_err = err.sql_err();
    classify_write_error(err, sql_err)
}

fn classify_write_error(err: DbErr, sql_err: Option<SqlErr>) -> AppError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Email uniqueness violated on write");
            AppError::conflict(MSG_EMAIL_IN_USE)
        }
        _ => AppError::from(err),
    }
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .find_also_related(ChurchEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(normalize_email(email)))
            .find_also_related(ChurchEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(normalize_email(&new_user.email)),
            name: Set(new_user.name),
            password_hash: Set(new_user.password_hash),
            image: Set(None),
            role: Set(new_user.role.to_string()),
            is_admin: Set(new_user.is_admin),
            is_leader: Set(new_user.is_leader),
            church_id: Set(new_user.church_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(write_error)?;
        self.find_by_id(model.id)
            .await?
            .ok_or_else(|| AppError::internal("Inserted user could not be reloaded"))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(MSG_USER_NOT_FOUND))?;

        let mut active: ActiveModel = existing.into();

        if let Some(email) = changes.email {
            active.email = Set(normalize_email(&email));
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(Some(password_hash));
        }
        if let Some(image) = changes.image {
            active.image = Set(image);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.to_string());
        }
        if let Some(is_admin) = changes.is_admin {
            active.is_admin = Set(is_admin);
        }
        if let Some(is_leader) = changes.is_leader {
            active.is_leader = Set(is_leader);
        }
        if let Some(church_id) = changes.church_id {
            active.church_id = Set(church_id);
        }
        active.updated_at = Set(chrono::Utc::now());

        active.update(&self.db).await.map_err(write_error)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(MSG_USER_NOT_FOUND))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(MSG_USER_NOT_FOUND));
        }

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let rows = UserEntity::find()
            .find_also_related(ChurchEntity)
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn list_by_church(&self, church_id: Uuid) -> AppResult<Vec<MemberSummary>> {
        let models = UserEntity::find()
            .filter(user::Column::ChurchId.eq(church_id))
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(MemberSummary::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        UserEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn count_by_role(&self) -> AppResult<Vec<RoleCount>> {
        let rows: Vec<(String, i64)> = UserEntity::find()
            .select_only()
            .column(user::Column::Role)
            .column_as(user::Column::Id.count(), "count")
            .group_by(user::Column::Role)
            .order_by_asc(user::Column::Role)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(role, count)| RoleCount {
                role: UserRole::from(role.as_str()),
                count: count.max(0) as u64,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let err = classify_write_error(
            DbErr::Custom("duplicate key".into()),
            Some(SqlErr::UniqueConstraintViolation(
                "users_email_key".into(),
            )),
        );
        assert!(matches!(err, AppError::Conflict(ref msg) if msg == MSG_EMAIL_IN_USE));
    }

    #[test]
    fn test_other_write_errors_stay_database() {
        let err = classify_write_error(DbErr::Custom("disk full".into()), None);
        assert!(matches!(err, AppError::Database(_)));

        let err = write_error(DbErr::RecordNotUpdated);
        assert!(matches!(err, AppError::Database(_)));
    }
}
