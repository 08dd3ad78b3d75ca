//! Edge route guard.
//!
//! Runs before every handler. API paths get CORS headers and preflight
//! short-circuiting; page paths are gated by session and policy.

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::AppState;
use crate::config::{
    ACCESS_DENIED_PATH, API_PREFIX, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, LEGACY_LOGIN_PATH,
    LOGIN_PATH,
};
use crate::domain::access::{can_access_route, home_for, route_tier, under_prefix};
use crate::domain::{RouteTier, SafeUser};

/// How the guard treats a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Api,
    Login,
    Protected,
    Public,
}

/// Terminal decision for a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    PassThrough,
    RedirectToLogin,
    RedirectToAccessDenied,
    RedirectToHome(&'static str),
}

pub fn classify_path(path: &str) -> PathClass {
    if under_prefix(path, API_PREFIX) {
        return PathClass::Api;
    }

    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    if trimmed == LOGIN_PATH || trimmed == LEGACY_LOGIN_PATH {
        return PathClass::Login;
    }

    match route_tier(path) {
        RouteTier::Public => PathClass::Public,
        _ => PathClass::Protected,
    }
}

/// Pure decision over an already resolved session.
pub fn decide(class: PathClass, path: &str, user: Option<&SafeUser>) -> GuardOutcome {
    match (class, user) {
        (PathClass::Api | PathClass::Public, _) => GuardOutcome::PassThrough,
        (PathClass::Login, None) => GuardOutcome::PassThrough,
        (PathClass::Login, Some(user)) => GuardOutcome::RedirectToHome(home_for(user)),
        (PathClass::Protected, None) => GuardOutcome::RedirectToLogin,
        (PathClass::Protected, Some(user)) => {
            if can_access_route(Some(user), path) {
                GuardOutcome::PassThrough
            } else {
                GuardOutcome::RedirectToAccessDenied
            }
        }
    }
}

/// Guard middleware applied to the whole router.
pub async fn route_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let class = classify_path(&path);

    if class == PathClass::Api {
        let origin = request.headers().get(ORIGIN).cloned();
        let mut response = if request.method() == Method::OPTIONS {
            StatusCode::OK.into_response()
        } else {
            next.run(request).await
        };
        apply_cors(response.headers_mut(), origin);
        return response;
    }

    let user = match class {
        PathClass::Login | PathClass::Protected => state.sessions.get_current_user(request.headers()),
        _ => None,
    };

    match decide(class, &path, user.as_ref()) {
        GuardOutcome::PassThrough => next.run(request).await,
        GuardOutcome::RedirectToLogin => {
            tracing::debug!(path = %path, "No session, redirecting to login");
            Redirect::temporary(LOGIN_PATH).into_response()
        }
        GuardOutcome::RedirectToAccessDenied => {
            tracing::warn!(
                path = %path,
                user_id = ?user.as_ref().map(|u| u.id),
                "Access denied by route policy"
            );
            Redirect::temporary(ACCESS_DENIED_PATH).into_response()
        }
        GuardOutcome::RedirectToHome(home) => Redirect::temporary(home).into_response(),
    }
}

fn apply_cors(headers: &mut HeaderMap, origin: Option<HeaderValue>) {
    headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        origin.unwrap_or_else(|| HeaderValue::from_static("*")),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use uuid::Uuid;

    fn user(role: UserRole, is_admin: bool, is_leader: bool) -> SafeUser {
        SafeUser {
            id: Uuid::new_v4(),
            email: "g@igreja.org".into(),
            name: "G".into(),
            image: None,
            is_admin,
            is_leader,
            role,
            church_id: None,
            church: None,
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify_path("/api/auth/login"), PathClass::Api);
        assert_eq!(classify_path("/api"), PathClass::Api);
        assert_eq!(classify_path("/apiary"), PathClass::Public);
        assert_eq!(classify_path("/auth"), PathClass::Login);
        assert_eq!(classify_path("/auth/"), PathClass::Login);
        assert_eq!(classify_path("/login"), PathClass::Login);
        assert_eq!(classify_path("/app/users"), PathClass::Protected);
        assert_eq!(classify_path("/dashboard"), PathClass::Protected);
        assert_eq!(classify_path("/"), PathClass::Public);
        assert_eq!(classify_path("/access-denied"), PathClass::Public);
    }

    #[test]
    fn test_anonymous_protected_goes_to_login() {
        assert_eq!(
            decide(PathClass::Protected, "/app", None),
            GuardOutcome::RedirectToLogin
        );
    }

    #[test]
    fn test_ordinary_user_denied_admin_area() {
        let u = user(UserRole::User, false, false);
        assert_eq!(
            decide(PathClass::Protected, "/app/churches", Some(&u)),
            GuardOutcome::RedirectToAccessDenied
        );
    }

    #[test]
    fn test_ordinary_user_general_tier_only() {
        let u = user(UserRole::User, false, false);
        assert_eq!(
            decide(PathClass::Protected, "/dashboard", Some(&u)),
            GuardOutcome::PassThrough
        );
        assert_eq!(
            decide(PathClass::Protected, "/dashboard/galeria", Some(&u)),
            GuardOutcome::RedirectToAccessDenied
        );
        assert_eq!(
            decide(PathClass::Protected, "/app", Some(&u)),
            GuardOutcome::RedirectToAccessDenied
        );
    }

    #[test]
    fn test_login_page_forwards_signed_in_users() {
        let admin = user(UserRole::User, true, false);
        let worker = user(UserRole::Workers, false, false);
        let plain = user(UserRole::User, false, false);

        assert_eq!(
            decide(PathClass::Login, "/auth", Some(&admin)),
            GuardOutcome::RedirectToHome("/app")
        );
        assert_eq!(
            decide(PathClass::Login, "/login", Some(&worker)),
            GuardOutcome::RedirectToHome("/dashboard")
        );
        assert_eq!(
            decide(PathClass::Login, "/auth", Some(&plain)),
            GuardOutcome::RedirectToHome("/dashboard")
        );
        assert_eq!(decide(PathClass::Login, "/auth", None), GuardOutcome::PassThrough);
    }

    #[test]
    fn test_department_route_for_leader() {
        let leader = user(UserRole::WorshipChurch, false, true);
        assert_eq!(
            decide(PathClass::Protected, "/dashboard/escala-louvor", Some(&leader)),
            GuardOutcome::PassThrough
        );
        assert_eq!(
            decide(PathClass::Protected, "/dashboard/galeria", Some(&leader)),
            GuardOutcome::RedirectToAccessDenied
        );
    }

    #[test]
    fn test_api_and_public_pass_without_session() {
        assert_eq!(
            decide(PathClass::Api, "/api/admin/users", None),
            GuardOutcome::PassThrough
        );
        assert_eq!(decide(PathClass::Public, "/", None), GuardOutcome::PassThrough);
    }

    #[test]
    fn test_cors_echoes_origin() {
        let mut headers = HeaderMap::new();
        apply_cors(&mut headers, Some(HeaderValue::from_static("https://app.igreja.org")));
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://app.igreja.org");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

        let mut headers = HeaderMap::new();
        apply_cors(&mut headers, None);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
