//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the authorization policy. Nothing here
//! performs I/O.

pub mod access;
pub mod church;
pub mod password;
pub mod user;

pub use access::{Area, Principal, RouteTier};
pub use church::{Church, ChurchDetail, ChurchInput, ChurchSummary, MemberSummary};
pub use password::{hash_password, verify_password, Password};
pub use user::{
    normalize_email, AdminStats, NewUser, RoleCount, SafeUser, User, UserChanges, UserRole,
};
