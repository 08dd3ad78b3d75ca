//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use super::responses::{MessageResponse, UserEnvelope, UserMessage};
use crate::api::extractors::{OptionalUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::SafeUser;
use crate::errors::{AppError, AppResult, FieldError};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 2, message = "Nome deve ter pelo menos 2 caracteres"))]
    #[schema(example = "Maria Souza")]
    pub name: String,
    /// User email address
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "maria@igreja.org")]
    pub email: String,
    /// Password (minimum 6 characters)
    #[validate(length(min = 6, message = "Senha deve ter pelo menos 6 caracteres"))]
    #[schema(example = "segredo123", min_length = 6)]
    pub password: String,
    /// Must repeat `password`
    #[schema(example = "segredo123")]
    pub confirm_password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "maria@igreja.org")]
    pub email: String,
    #[validate(length(min = 1, message = "Senha é obrigatória"))]
    #[schema(example = "segredo123")]
    pub password: String,
}

/// Session probe result
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SafeUser>,
}

/// Admin probe result
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatus {
    pub authenticated: bool,
    pub is_admin: bool,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
        .route("/check-admin", get(check_admin))
        .route("/check-status", get(check_status))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserMessage),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserMessage>)> {
    if payload.password != payload.confirm_password {
        return Err(AppError::InvalidFields(vec![FieldError::new(
            "confirmPassword",
            "As senhas não coincidem",
        )]));
    }

    let user = state
        .auth_service
        .register(payload.name, payload.email, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserMessage {
            message: "Usuário criado com sucesso".into(),
            user,
        }),
    ))
}

/// Login and receive the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, sets the auth-token cookie", body = UserEnvelope),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<UserEnvelope>)> {
    let session = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    let jar = jar.add(state.sessions.session_cookie(session.token));
    Ok((jar, Json(UserEnvelope { user: session.user })))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Authentication",
    responses((status = 200, description = "Session cleared", body = MessageResponse))
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.add(state.sessions.removal_cookie()),
        Json(MessageResponse::new("Logout realizado com sucesso")),
    )
}

/// Current session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "Authentication",
    responses(
        (status = 200, description = "Signed in", body = SessionStatus),
        (status = 401, description = "No valid session", body = SessionStatus)
    )
)]
pub async fn session(OptionalUser(user): OptionalUser) -> (StatusCode, Json<SessionStatus>) {
    let status = if user.is_some() {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (
        status,
        Json(SessionStatus {
            authenticated: user.is_some(),
            user,
        }),
    )
}

/// Whether the caller carries the global admin flag
#[utoipa::path(
    get,
    path = "/api/auth/check-admin",
    tag = "Authentication",
    responses(
        (status = 200, description = "Signed in", body = AdminStatus),
        (status = 401, description = "No valid session")
    )
)]
pub async fn check_admin(OptionalUser(user): OptionalUser) -> Response {
    match user {
        Some(user) => Json(AdminStatus {
            authenticated: true,
            is_admin: user.is_admin,
        })
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "authenticated": false })),
        )
            .into_response(),
    }
}

/// Session probe that always carries a `user` key
#[utoipa::path(
    get,
    path = "/api/auth/check-status",
    tag = "Authentication",
    responses(
        (status = 200, description = "Signed in"),
        (status = 401, description = "No valid session")
    )
)]
pub async fn check_status(OptionalUser(user): OptionalUser) -> Response {
    match user {
        Some(user) => Json(json!({ "authenticated": true, "user": user })).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "authenticated": false, "user": null })),
        )
            .into_response(),
    }
}
