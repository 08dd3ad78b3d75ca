//! Admin user management handlers.
//!
//! Every route requires a privileged session: anonymous callers get 401,
//! signed-in users without privilege get 403.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::responses::{MessageResponse, UserEnvelope};
use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::middleware::require_privileged;
use crate::api::AppState;
use crate::domain::{SafeUser, UserRole};
use crate::errors::{AppError, AppResult};
use crate::services::{CreateUserInput, UpdateUserInput};

/// Admin user creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    #[schema(example = "João Lima")]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "joao@igreja.org")]
    pub email: String,
    #[validate(length(min = 6, message = "Senha deve ter pelo menos 6 caracteres"))]
    pub password: String,
    /// One of the role names, e.g. `MEDIA_CHURCH`
    #[schema(example = "WORKERS")]
    pub role: String,
    /// Empty string or null leaves the user without a church
    pub church_id: Option<String>,
    #[serde(default)]
    pub is_leader: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// Admin user update request; absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Senha deve ter pelo menos 6 caracteres"))]
    pub password: Option<String>,
    pub role: Option<String>,
    /// `null` or empty string detaches the user from its church
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub church_id: Option<Option<String>>,
    pub is_leader: Option<bool>,
    pub is_admin: Option<bool>,
}

/// `{ users }`
#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub users: Vec<SafeUser>,
}

/// Distinguishes an explicit `null` from an absent key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn parse_church_id(raw: Option<String>) -> AppResult<Option<Uuid>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => Uuid::parse_str(id)
            .map(Some)
            .map_err(|_| AppError::validation("Igreja inválida")),
    }
}

/// Create admin user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users ordered by name
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    responses(
        (status = 200, description = "All users", body = UserList),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not privileged")
    ),
    security(("cookie_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<UserList>> {
    require_privileged(&actor)?;
    let users = state.user_service.list_users().await?;
    Ok(Json(UserList { users }))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 403, description = "Not privileged"),
        (status = 404, description = "User not found")
    ),
    security(("cookie_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserEnvelope>> {
    require_privileged(&actor)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserEnvelope { user }))
}

/// Create a user with any role
#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "Admin",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 400, description = "Validation error, unknown role or church"),
        (status = 403, description = "Not privileged"),
        (status = 409, description = "Email already in use")
    ),
    security(("cookie_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserEnvelope>)> {
    require_privileged(&actor)?;

    let input = CreateUserInput {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        role: payload.role.parse::<UserRole>()?,
        church_id: parse_church_id(payload.church_id)?,
        is_leader: payload.is_leader,
        is_admin: payload.is_admin,
    };
    let user = state.user_service.create_user(input).await?;

    tracing::info!(actor_id = %actor.id, user_id = %user.id, "User created by admin");
    Ok((StatusCode::CREATED, Json(UserEnvelope { user })))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not privileged"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    ),
    security(("cookie_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserEnvelope>> {
    require_privileged(&actor)?;

    let input = UpdateUserInput {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        role: payload.role.map(|r| r.parse::<UserRole>()).transpose()?,
        church_id: payload.church_id.map(parse_church_id).transpose()?,
        is_leader: payload.is_leader,
        is_admin: payload.is_admin,
    };
    let user = state.user_service.update_user(id, input).await?;

    Ok(Json(UserEnvelope { user }))
}

/// Delete a user other than the caller
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Attempted self-deletion"),
        (status = 403, description = "Not privileged"),
        (status = 404, description = "User not found")
    ),
    security(("cookie_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require_privileged(&actor)?;
    state.user_service.delete_user(actor.id, id).await?;

    tracing::info!(actor_id = %actor.id, user_id = %id, "User deleted by admin");
    Ok(Json(MessageResponse::new("Usuário excluído com sucesso")))
}
