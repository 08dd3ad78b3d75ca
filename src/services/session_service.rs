//! Session resolution from the request cookie.
//!
//! Read-only: the store is never consulted, so role or flag changes made
//! after a token was issued only apply once the user signs in again.

use std::sync::Arc;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::token_service::{SessionClaims, TokenService};
use crate::config::{Config, SESSION_COOKIE_NAME, SESSION_TTL_DAYS};
use crate::domain::SafeUser;

/// Resolves the current session and builds session cookies.
#[derive(Clone)]
pub struct SessionResolver {
    tokens: Arc<TokenService>,
    secure_cookies: bool,
}

impl SessionResolver {
    pub fn new(tokens: Arc<TokenService>, secure_cookies: bool) -> Self {
        Self {
            tokens,
            secure_cookies,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(TokenService::from_config(config)),
            config.is_production(),
        )
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Verified claims from the `auth-token` cookie, if any.
    pub fn get_session(&self, headers: &HeaderMap) -> Option<SessionClaims> {
        let jar = CookieJar::from_headers(headers);
        let token = jar.get(SESSION_COOKIE_NAME)?.value().to_owned();
        self.tokens.verify(&token)
    }

    /// Safe projection of the signed-in user, if any.
    pub fn get_current_user(&self, headers: &HeaderMap) -> Option<SafeUser> {
        self.get_session(headers).map(|claims| claims.user)
    }

    /// Cookie carrying a freshly issued token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, token))
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Strict)
            .max_age(time::Duration::days(SESSION_TTL_DAYS))
            .build()
    }

    /// Cookie that clears the session in the browser.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, ""))
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Strict)
            .max_age(time::Duration::ZERO)
            .build()
    }
}
