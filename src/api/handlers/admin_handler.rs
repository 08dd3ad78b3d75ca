//! Admin overview and out-of-band promotion.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::middleware::require_privileged;
use crate::api::AppState;
use crate::domain::AdminStats;
use crate::errors::{AppError, AppResult};

/// Promotion request guarded by the shared admin secret
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MakeAdminRequest {
    #[schema(example = "maria@igreja.org")]
    pub email: Option<String>,
    pub secret: Option<String>,
}

/// Promoted account
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromotedUser {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MakeAdminResponse {
    pub message: String,
    pub user: PromotedUser,
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/make-admin", post(make_admin))
}

/// Aggregate user and church counts
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Counters", body = AdminStats),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not privileged")
    ),
    security(("cookie_auth" = []))
)]
pub async fn stats(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<AdminStats>> {
    require_privileged(&actor)?;
    Ok(Json(state.user_service.stats().await?))
}

/// Grant the global admin flag by email
#[utoipa::path(
    post,
    path = "/api/admin/make-admin",
    tag = "Admin",
    request_body = MakeAdminRequest,
    responses(
        (status = 200, description = "User promoted", body = MakeAdminResponse),
        (status = 400, description = "Email missing"),
        (status = 401, description = "Wrong or missing secret"),
        (status = 404, description = "User not found")
    )
)]
pub async fn make_admin(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<MakeAdminRequest>,
) -> AppResult<Json<MakeAdminResponse>> {
    let secret = payload.secret.unwrap_or_default();
    if !state.config.admin_secret_matches(&secret) {
        tracing::warn!("Admin promotion rejected: bad secret");
        return Err(AppError::Unauthorized);
    }

    let email = payload
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Email é obrigatório"))?;

    let user = state.user_service.promote_to_admin(&email).await?;
    tracing::info!(user_id = %user.id, "User promoted to admin");

    Ok(Json(MakeAdminResponse {
        message: "Usuário promovido a administrador com sucesso".into(),
        user: PromotedUser {
            id: user.id,
            email: user.email,
            is_admin: user.is_admin,
        },
    }))
}
