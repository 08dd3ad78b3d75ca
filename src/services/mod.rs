//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits, never on
//! concrete stores.

mod auth_service;
mod church_service;
pub mod container;
mod session_service;
mod token_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, LoginSession};
pub use church_service::{ChurchManager, ChurchService};
pub use session_service::SessionResolver;
pub use token_service::{SessionClaims, TokenService};
pub use user_service::{CreateUserInput, ProfileUpdate, UpdateUserInput, UserManager, UserService};
