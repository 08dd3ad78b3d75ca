//! Church service - Church management use cases.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{MSG_CHURCH_NAME_REQUIRED, MSG_CHURCH_NOT_FOUND};
use crate::domain::{Church, ChurchDetail, ChurchInput};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{ChurchRepository, UserRepository};

/// Church service trait for dependency injection.
#[async_trait]
pub trait ChurchService: Send + Sync {
    async fn list_churches(&self) -> AppResult<Vec<Church>>;

    /// Church with its member summaries
    async fn get_church(&self, id: Uuid) -> AppResult<ChurchDetail>;

    async fn create_church(&self, name: String, address: Option<String>) -> AppResult<Church>;

    async fn update_church(
        &self,
        id: Uuid,
        name: String,
        address: Option<String>,
    ) -> AppResult<Church>;

    /// Detach members and remove the church. Members are never deleted.
    async fn delete_church(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ChurchService.
pub struct ChurchManager {
    churches: Arc<dyn ChurchRepository>,
    users: Arc<dyn UserRepository>,
}

impl ChurchManager {
    pub fn new(churches: Arc<dyn ChurchRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { churches, users }
    }
}

/// Trim and require a name; blank addresses become `None`.
fn church_input(name: String, address: Option<String>) -> AppResult<ChurchInput> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation(MSG_CHURCH_NAME_REQUIRED));
    }

    Ok(ChurchInput {
        name,
        address: address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty()),
    })
}

#[async_trait]
impl ChurchService for ChurchManager {
    async fn list_churches(&self) -> AppResult<Vec<Church>> {
        self.churches.list().await
    }

    async fn get_church(&self, id: Uuid) -> AppResult<ChurchDetail> {
        let church = self
            .churches
            .find_by_id(id)
            .await?
            .ok_or_not_found(MSG_CHURCH_NOT_FOUND)?;
        let users = self.users.list_by_church(id).await?;

        Ok(ChurchDetail { church, users })
    }

    async fn create_church(&self, name: String, address: Option<String>) -> AppResult<Church> {
        let church = self.churches.create(church_input(name, address)?).await?;
        tracing::info!(church_id = %church.id, "Church created");
        Ok(church)
    }

    async fn update_church(
        &self,
        id: Uuid,
        name: String,
        address: Option<String>,
    ) -> AppResult<Church> {
        let input = church_input(name, address)?;
        self.churches.update(id, input).await
    }

    async fn delete_church(&self, id: Uuid) -> AppResult<()> {
        let detached = self.churches.delete_detaching_members(id).await?;
        tracing::info!(church_id = %id, detached, "Church deleted");
        Ok(())
    }
}
