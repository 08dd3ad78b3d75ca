//! Service Container - Centralized service construction and access.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    AuthService, Authenticator, ChurchManager, ChurchService, SessionResolver, TokenService,
    UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{ChurchRepository, ChurchStore, UserRepository, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn churches(&self) -> Arc<dyn ChurchService>;

    fn sessions(&self) -> SessionResolver;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    church_service: Arc<dyn ChurchService>,
    sessions: SessionResolver,
}

impl Services {
    /// Wire every service over the given repositories.
    pub fn from_repositories(
        users: Arc<dyn UserRepository>,
        churches: Arc<dyn ChurchRepository>,
        config: &Config,
    ) -> Self {
        let tokens = Arc::new(TokenService::from_config(config));
        let sessions = SessionResolver::new(tokens.clone(), config.is_production());

        Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), tokens)),
            user_service: Arc::new(UserManager::new(users.clone(), churches.clone())),
            church_service: Arc::new(ChurchManager::new(churches, users)),
            sessions,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: DatabaseConnection, config: &Config) -> Self {
        Self::from_repositories(
            Arc::new(UserStore::new(db.clone())),
            Arc::new(ChurchStore::new(db)),
            config,
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn churches(&self) -> Arc<dyn ChurchService> {
        self.church_service.clone()
    }

    fn sessions(&self) -> SessionResolver {
        self.sessions.clone()
    }
}
