//! Self-service profile handler.

use axum::{extract::State, response::Json, routing::put, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::responses::UserMessage;
use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::ProfileUpdate;

/// Profile update request; absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    pub image: Option<String>,
    /// Required when `newPassword` is present
    pub current_password: Option<String>,
    #[validate(length(min = 6, message = "Senha deve ter pelo menos 6 caracteres"))]
    pub new_password: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            image: req.image,
            current_password: req.current_password,
            new_password: req.new_password,
        }
    }
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", put(update_profile))
}

/// Update the signed-in user's profile
#[utoipa::path(
    put,
    path = "/api/users/profile",
    tag = "Profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserMessage),
        (status = 400, description = "Validation error or wrong current password"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Email already in use")
    ),
    security(("cookie_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserMessage>> {
    let user = state
        .user_service
        .update_profile(user.id, payload.into())
        .await?;

    Ok(Json(UserMessage {
        message: "Perfil atualizado com sucesso".into(),
        user,
    }))
}
