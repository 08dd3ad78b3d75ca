//! Church domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserRole;

/// Organizational grouping users may belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Church {
    pub id: Uuid,
    #[schema(example = "Igreja Central")]
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Church reference embedded in users and session claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChurchSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&Church> for ChurchSummary {
    fn from(church: &Church) -> Self {
        Self {
            id: church.id,
            name: church.name.clone(),
        }
    }
}

/// Member listing shown on a church's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MemberSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Church with its current members.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChurchDetail {
    #[serde(flatten)]
    pub church: Church,
    pub users: Vec<MemberSummary>,
}

/// Validated church fields for create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChurchInput {
    pub name: String,
    pub address: Option<String>,
}
