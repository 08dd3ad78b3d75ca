//! Church repository implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::church::{self, ActiveModel, Entity as ChurchEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::config::MSG_CHURCH_NOT_FOUND;
use crate::domain::{Church, ChurchInput};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Church repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ChurchRepository: Send + Sync {
    /// Find church by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Church>>;

    /// List all churches ordered by name
    async fn list(&self) -> AppResult<Vec<Church>>;

    /// Create a new church
    async fn create(&self, input: ChurchInput) -> AppResult<Church>;

    /// Replace name and address
    async fn update(&self, id: Uuid, input: ChurchInput) -> AppResult<Church>;

    /// Null out every member's church reference, then delete the church.
    ///
    /// Returns the number of detached members.
    async fn delete_detaching_members(&self, id: Uuid) -> AppResult<u64>;

    /// Count all churches
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of ChurchRepository
pub struct ChurchStore {
    db: DatabaseConnection,
}

impl ChurchStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChurchRepository for ChurchStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Church>> {
        let result = ChurchEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Church::from))
    }

    async fn list(&self) -> AppResult<Vec<Church>> {
        let models = ChurchEntity::find()
            .order_by_asc(church::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Church::from).collect())
    }

    async fn create(&self, input: ChurchInput) -> AppResult<Church> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            address: Set(input.address),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Church::from(model))
    }

    async fn update(&self, id: Uuid, input: ChurchInput) -> AppResult<Church> {
        let existing = ChurchEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(MSG_CHURCH_NOT_FOUND))?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);
        active.address = Set(input.address);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Church::from(model))
    }

    async fn delete_detaching_members(&self, id: Uuid) -> AppResult<u64> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        if ChurchEntity::find_by_id(id).one(&txn).await?.is_none() {
            // Dropping the transaction rolls it back
            return Err(AppError::not_found(MSG_CHURCH_NOT_FOUND));
        }

        let detached = UserEntity::update_many()
            .col_expr(user::Column::ChurchId, Expr::value(Option::<Uuid>::None))
            .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(user::Column::ChurchId.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        ChurchEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;

        Ok(detached.rows_affected)
    }

    async fn count(&self) -> AppResult<u64> {
        ChurchEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
