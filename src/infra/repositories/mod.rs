//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod church_repository;
pub(crate) mod entities;
mod user_repository;

pub use church_repository::{ChurchRepository, ChurchStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use church_repository::MockChurchRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
