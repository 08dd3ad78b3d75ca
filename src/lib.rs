//! Church Portal - authentication and role-based access core
//!
//! Cookie sessions carrying signed user claims, a pure authorization
//! policy over roles and department areas, and an edge route guard in
//! front of the administration API.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, churches, passwords and the access policy
//! - **services**: Tokens, sessions and account use cases
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, route guard and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! church-portal serve
//!
//! # Run migrations
//! church-portal migrate up
//!
//! # Grant the admin flag
//! church-portal promote-admin --email maria@igreja.org
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, SafeUser, User, UserRole};
pub use errors::{AppError, AppResult};
