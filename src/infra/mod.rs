//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations and the repositories backing the
//! credential store.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{ChurchRepository, ChurchStore, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockChurchRepository, MockUserRepository};
