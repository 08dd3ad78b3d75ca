//! Application settings loaded from environment variables.

use std::env;

use subtle::ConstantTimeEq;

use super::constants::{DEFAULT_DATABASE_URL, DEV_JWT_SECRET, MIN_JWT_SECRET_LENGTH};
use crate::errors::{AppError, AppResult};

/// Deployment environment, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    admin_secret: Option<String>,
    pub environment: Environment,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("admin_secret", &self.admin_secret.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .finish()
    }
}

impl Config {
    /// Build a configuration from explicit values.
    ///
    /// # Errors
    /// Returns a validation error if the signing secret is too short.
    pub fn new(
        database_url: impl Into<String>,
        jwt_secret: impl Into<String>,
        admin_secret: Option<String>,
    ) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::validation(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: database_url.into(),
            jwt_secret,
            admin_secret: admin_secret.filter(|s| !s.is_empty()),
            environment: Environment::Development,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Release builds refuse to start without `JWT_SECRET`; debug builds
    /// fall back to an insecure development secret.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let mut config = Self::new(database_url, jwt_secret, env::var("ADMIN_SECRET").ok())?;

        config.environment = env::var("APP_ENV")
            .map(|v| Environment::from_env_value(&v))
            .unwrap_or(Environment::Development);

        Ok(config)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Compare a supplied admin-promotion secret against the configured one.
    ///
    /// Always false when no `ADMIN_SECRET` is configured.
    pub fn admin_secret_matches(&self, supplied: &str) -> bool {
        match &self.admin_secret {
            Some(expected) => {
                let expected = expected.as_bytes();
                let supplied = supplied.as_bytes();
                expected.len() == supplied.len() && bool::from(expected.ct_eq(supplied))
            }
            None => false,
        }
    }

    /// Whether session cookies must carry the `Secure` attribute.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new("postgres://x", "too-short", None);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_admin_secret_comparison() {
        let config = Config::new("postgres://x", SECRET, Some("s3cret".to_string())).unwrap();
        assert!(config.admin_secret_matches("s3cret"));
        assert!(!config.admin_secret_matches("s3cre"));
        assert!(!config.admin_secret_matches("wrong!"));
    }

    #[test]
    fn test_missing_admin_secret_never_matches() {
        let config = Config::new("postgres://x", SECRET, Some(String::new())).unwrap();
        assert!(!config.admin_secret_matches(""));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("postgres://user:pw@db", SECRET, Some("s3cret".into())).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains(SECRET));
        assert!(!rendered.contains("s3cret"));
        assert!(!rendered.contains("user:pw"));
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_env_value("PRODUCTION"), Environment::Production);
        assert_eq!(Environment::from_env_value("staging"), Environment::Development);
    }
}
