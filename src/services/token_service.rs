//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs whose payload is the safe-user projection plus
//! `iat`/`exp`. Claims are signed, not encrypted.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{Config, SESSION_TTL_DAYS};
use crate::domain::SafeUser;
use crate::errors::{AppError, AppResult};

/// Wire payload of a session token.
#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    #[serde(flatten)]
    user: SafeUser,
    iat: i64,
    exp: i64,
}

/// Verified contents of a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user: SafeUser,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens with the process-wide secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret_bytes())
    }

    /// Lifetime of every issued token.
    pub fn ttl() -> Duration {
        Duration::days(SESSION_TTL_DAYS)
    }

    /// Issue a token for `user` valid from now.
    pub fn issue(&self, user: &SafeUser) -> AppResult<String> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as if signed at `issued_at`.
    pub fn issue_at(&self, user: &SafeUser, issued_at: DateTime<Utc>) -> AppResult<String> {
        let payload = TokenPayload {
            user: user.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Self::ttl()).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))
    }

    /// Check signature and expiry. Any failure yields `None`.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        let data = match decode::<TokenPayload>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                return None;
            }
        };

        let payload = data.claims;
        Some(SessionClaims {
            user: payload.user,
            issued_at: Utc.timestamp_opt(payload.iat, 0).single()?,
            expires_at: Utc.timestamp_opt(payload.exp, 0).single()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChurchSummary, UserRole};
    use uuid::Uuid;

    const SECRET: &[u8] = b"unit-test-secret-with-32-bytes!!";

    fn sample_user() -> SafeUser {
        let church_id = Uuid::new_v4();
        SafeUser {
            id: Uuid::new_v4(),
            email: "a@b.com".into(),
            name: "Ana".into(),
            image: Some("/uploads/ana.png".into()),
            is_admin: false,
            is_leader: true,
            role: UserRole::WorshipChurch,
            church_id: Some(church_id),
            church: Some(ChurchSummary {
                id: church_id,
                name: "Sede".into(),
            }),
        }
    }

    #[test]
    fn test_round_trip_preserves_claims() {
        let service = TokenService::new(SECRET);
        let user = sample_user();

        let token = service.issue(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user, user);
        assert_eq!(claims.expires_at - claims.issued_at, Duration::days(30));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = TokenService::new(SECRET);
        let token = service.issue(&sample_user()).unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let sig = parts[2].clone();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        parts[2] = format!("{}{}", flipped, &sig[1..]);

        assert!(service.verify(&parts.join(".")).is_none());
    }

    #[test]
    fn test_other_secret_rejected() {
        let issuer = TokenService::new(SECRET);
        let other = TokenService::new(b"another-secret-with-32-bytes!!!!");
        let token = issuer.issue(&sample_user()).unwrap();

        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new(SECRET);
        let token = service
            .issue_at(&sample_user(), Utc::now() - Duration::days(31))
            .unwrap();

        assert!(service.verify(&token).is_none());
    }

    #[test]
    fn test_garbage_rejected() {
        let service = TokenService::new(SECRET);
        assert!(service.verify("").is_none());
        assert!(service.verify("not-a-token").is_none());
        assert!(service.verify("a.b.c").is_none());
    }

    #[test]
    fn test_claims_are_camel_case() {
        let service = TokenService::new(SECRET);
        let token = service.issue(&sample_user()).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        let raw = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(b""), &validation)
            .unwrap()
            .claims;

        assert_eq!(raw["isLeader"], true);
        assert_eq!(raw["role"], "WORSHIP_CHURCH");
        assert!(raw.get("password").is_none());
        assert!(raw["exp"].is_i64());
    }
}
