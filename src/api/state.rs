//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, ChurchService, ServiceContainer, Services, SessionResolver, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Registration and login
    pub auth_service: Arc<dyn AuthService>,
    /// User administration, profile and promotion
    pub user_service: Arc<dyn UserService>,
    /// Church management
    pub church_service: Arc<dyn ChurchService>,
    /// Cookie session resolution
    pub sessions: SessionResolver,
    /// Process-wide configuration
    pub config: Arc<Config>,
    /// Database handle for health checks; absent in tests
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), &config);
        let mut state = Self::from_services(&services, config);
        state.database = Some(database);
        state
    }

    /// Create application state from an already wired container.
    pub fn from_services(services: &impl ServiceContainer, config: Config) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            church_service: services.churches(),
            sessions: services.sessions(),
            config: Arc::new(config),
            database: None,
        }
    }
}
