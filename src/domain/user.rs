//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::church::ChurchSummary;
use crate::errors::AppError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    MediaChurch,
    WorshipChurch,
    Workers,
    Master,
    Developer,
}

impl UserRole {
    pub const ALL: [UserRole; 6] = [
        UserRole::User,
        UserRole::MediaChurch,
        UserRole::WorshipChurch,
        UserRole::Workers,
        UserRole::Master,
        UserRole::Developer,
    ];

    /// Stored/serialized form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::MediaChurch => "MEDIA_CHURCH",
            UserRole::WorshipChurch => "WORSHIP_CHURCH",
            UserRole::Workers => "WORKERS",
            UserRole::Master => "MASTER",
            UserRole::Developer => "DEVELOPER",
        }
    }
}

/// Lenient conversion used when reading stored rows: unknown values fall back to `User`.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or(UserRole::User)
    }
}

/// Strict conversion used for request payloads.
impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Função inválida: {}", s)))
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// `salt:digest` composite; absent for accounts without a local credential
    pub password_hash: Option<String>,
    pub image: Option<String>,
    pub role: UserRole,
    pub is_admin: bool,
    pub is_leader: bool,
    pub church_id: Option<Uuid>,
    pub church: Option<ChurchSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User projection safe to return to clients and to embed in session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafeUser {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "maria@igreja.org")]
    pub email: String,
    #[schema(example = "Maria Souza")]
    pub name: String,
    pub image: Option<String>,
    pub is_admin: bool,
    #[serde(default)]
    pub is_leader: bool,
    pub role: UserRole,
    pub church_id: Option<Uuid>,
    pub church: Option<ChurchSummary>,
}

impl From<&User> for SafeUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            image: user.image.clone(),
            is_admin: user.is_admin,
            is_leader: user.is_leader,
            role: user.role,
            church_id: user.church_id,
            church: user.church.clone(),
        }
    }
}

impl From<User> for SafeUser {
    fn from(user: User) -> Self {
        SafeUser::from(&user)
    }
}

/// Data required to persist a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub is_admin: bool,
    pub is_leader: bool,
    pub church_id: Option<Uuid>,
}

/// Partial update of a user record. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub image: Option<Option<String>>,
    pub role: Option<UserRole>,
    pub is_admin: Option<bool>,
    pub is_leader: Option<bool>,
    pub church_id: Option<Option<Uuid>>,
}

/// Number of users holding a given role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RoleCount {
    pub role: UserRole,
    pub count: u64,
}

/// Aggregate counters for the admin overview.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub users: u64,
    pub churches: u64,
    pub users_by_role: Vec<RoleCount>,
}

/// Normalize an email for storage and lookup (trimmed, lower-cased).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
