//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, church_handler, profile_handler, responses, user_handler,
};
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{
    AdminStats, Church, ChurchDetail, ChurchSummary, MemberSummary, RoleCount, SafeUser, UserRole,
};
use crate::errors::{ErrorResponse, FieldError};

/// OpenAPI documentation for the church portal
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Church Portal",
        version = "0.1.0",
        description = "Session authentication, role-based access and administration for a church portal"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::session,
        auth_handler::check_admin,
        auth_handler::check_status,
        profile_handler::update_profile,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        church_handler::list_churches,
        church_handler::get_church,
        church_handler::create_church,
        church_handler::update_church,
        church_handler::delete_church,
        admin_handler::stats,
        admin_handler::make_admin,
    ),
    components(
        schemas(
            UserRole,
            SafeUser,
            Church,
            ChurchSummary,
            ChurchDetail,
            MemberSummary,
            RoleCount,
            AdminStats,
            ErrorResponse,
            FieldError,
            responses::UserEnvelope,
            responses::UserMessage,
            responses::MessageResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::SessionStatus,
            auth_handler::AdminStatus,
            profile_handler::UpdateProfileRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            user_handler::UserList,
            church_handler::ChurchRequest,
            church_handler::ChurchList,
            church_handler::ChurchEnvelope,
            church_handler::ChurchDetailEnvelope,
            admin_handler::MakeAdminRequest,
            admin_handler::MakeAdminResponse,
            admin_handler::PromotedUser,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and session probes"),
        (name = "Profile", description = "Self-service profile changes"),
        (name = "Admin", description = "User administration and statistics"),
        (name = "Churches", description = "Church management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the session cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    SESSION_COOKIE_NAME,
                    "Session token set by /api/auth/login",
                ))),
            );
        }
    }
}
