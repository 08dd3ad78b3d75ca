//! Church management handlers.
//!
//! Reads are open to privileged users and operational roles; writes
//! require privilege.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::responses::MessageResponse;
use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::middleware::{require_operational_or_privileged, require_privileged};
use crate::api::AppState;
use crate::domain::{Church, ChurchDetail};
use crate::errors::AppResult;

/// Church create/update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChurchRequest {
    /// Required, surrounding whitespace is trimmed
    #[serde(default)]
    #[schema(example = "Igreja Central")]
    pub name: String,
    #[schema(example = "Rua das Flores, 100")]
    pub address: Option<String>,
}

/// `{ churches }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ChurchList {
    pub churches: Vec<Church>,
}

/// `{ church }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ChurchEnvelope {
    pub church: Church,
}

/// `{ church }` with members
#[derive(Debug, Serialize, ToSchema)]
pub struct ChurchDetailEnvelope {
    pub church: ChurchDetail,
}

pub fn church_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_churches).post(create_church))
        .route(
            "/:id",
            get(get_church).put(update_church).delete(delete_church),
        )
}

/// List churches
#[utoipa::path(
    get,
    path = "/api/admin/churches",
    tag = "Churches",
    responses(
        (status = 200, description = "All churches", body = ChurchList),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "No operational role")
    ),
    security(("cookie_auth" = []))
)]
pub async fn list_churches(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<ChurchList>> {
    require_operational_or_privileged(&actor)?;
    let churches = state.church_service.list_churches().await?;
    Ok(Json(ChurchList { churches }))
}

/// Church with member summaries
#[utoipa::path(
    get,
    path = "/api/admin/churches/{id}",
    tag = "Churches",
    params(("id" = Uuid, Path, description = "Church ID")),
    responses(
        (status = 200, description = "Church found", body = ChurchDetailEnvelope),
        (status = 403, description = "No operational role"),
        (status = 404, description = "Church not found")
    ),
    security(("cookie_auth" = []))
)]
pub async fn get_church(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ChurchDetailEnvelope>> {
    require_operational_or_privileged(&actor)?;
    let church = state.church_service.get_church(id).await?;
    Ok(Json(ChurchDetailEnvelope { church }))
}

/// Create a church
#[utoipa::path(
    post,
    path = "/api/admin/churches",
    tag = "Churches",
    request_body = ChurchRequest,
    responses(
        (status = 201, description = "Church created", body = ChurchEnvelope),
        (status = 400, description = "Name missing"),
        (status = 403, description = "Not privileged")
    ),
    security(("cookie_auth" = []))
)]
pub async fn create_church(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ValidatedJson(payload): ValidatedJson<ChurchRequest>,
) -> AppResult<(StatusCode, Json<ChurchEnvelope>)> {
    require_privileged(&actor)?;
    let church = state
        .church_service
        .create_church(payload.name, payload.address)
        .await?;

    tracing::info!(actor_id = %actor.id, church_id = %church.id, "Church created");
    Ok((StatusCode::CREATED, Json(ChurchEnvelope { church })))
}

/// Update a church
#[utoipa::path(
    put,
    path = "/api/admin/churches/{id}",
    tag = "Churches",
    params(("id" = Uuid, Path, description = "Church ID")),
    request_body = ChurchRequest,
    responses(
        (status = 200, description = "Church updated", body = ChurchEnvelope),
        (status = 400, description = "Name missing"),
        (status = 403, description = "Not privileged"),
        (status = 404, description = "Church not found")
    ),
    security(("cookie_auth" = []))
)]
pub async fn update_church(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ChurchRequest>,
) -> AppResult<Json<ChurchEnvelope>> {
    require_privileged(&actor)?;
    let church = state
        .church_service
        .update_church(id, payload.name, payload.address)
        .await?;
    Ok(Json(ChurchEnvelope { church }))
}

/// Detach members and delete a church
#[utoipa::path(
    delete,
    path = "/api/admin/churches/{id}",
    tag = "Churches",
    params(("id" = Uuid, Path, description = "Church ID")),
    responses(
        (status = 200, description = "Church deleted", body = MessageResponse),
        (status = 403, description = "Not privileged"),
        (status = 404, description = "Church not found")
    ),
    security(("cookie_auth" = []))
)]
pub async fn delete_church(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require_privileged(&actor)?;
    state.church_service.delete_church(id).await?;

    tracing::info!(actor_id = %actor.id, church_id = %id, "Church deleted");
    Ok(Json(MessageResponse::new("Igreja excluída com sucesso")))
}
