//! Password value object - Domain layer password handling.
//!
//! Digests are stored as `salt:digest`, where `salt` is 16 random bytes
//! hex-encoded and `digest` is the hex SHA-256 of `plaintext + salt`.

use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::config::{MIN_PASSWORD_LENGTH, PASSWORD_DIGEST_SEPARATOR, PASSWORD_SALT_BYTES};
use crate::errors::{AppError, AppResult};

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns validation error if password is shorter than the minimum length.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "A senha deve ter pelo menos {} caracteres",
                MIN_PASSWORD_LENGTH
            )));
        }

        Ok(Self {
            hash: hash_password(plain_text),
        })
    }

    /// Create a Password from an existing composite (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the composite string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the composite string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this composite.
    pub fn verify(&self, plain_text: &str) -> bool {
        verify_password(&self.hash, plain_text)
    }
}

/// Derive a fresh `salt:digest` composite for `plain_text`.
pub fn hash_password(plain_text: &str) -> String {
    let salt = hex::encode(rand::rng().random::<[u8; PASSWORD_SALT_BYTES]>());
    let digest = digest_with_salt(plain_text, &salt);
    format!("{}{}{}", salt, PASSWORD_DIGEST_SEPARATOR, digest)
}

/// Check `supplied` against a stored `salt:digest` composite.
///
/// Returns false for any malformed composite.
pub fn verify_password(stored: &str, supplied: &str) -> bool {
    let Some((salt, expected)) = stored.split_once(PASSWORD_DIGEST_SEPARATOR) else {
        return false;
    };
    if salt.is_empty() || expected.is_empty() || hex::decode(expected).is_err() {
        return false;
    }

    let actual = digest_with_salt(supplied, salt);
    let expected = expected.to_ascii_lowercase();
    actual.len() == expected.len() && bool::from(actual.as_bytes().ct_eq(expected.as_bytes()))
}

fn digest_with_salt(plain_text: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain_text.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_composite_layout() {
        let stored = hash_password("secret1");
        let (salt, digest) = stored.split_once(':').unwrap();

        assert_eq!(salt.len(), PASSWORD_SALT_BYTES * 2);
        assert_eq!(digest.len(), 64);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_known_digest_verifies() {
        // sha256("abc123" + "00ff")
        let mut hasher = Sha256::new();
        hasher.update(b"abc12300ff");
        let stored = format!("00ff:{}", hex::encode(hasher.finalize()));

        assert!(verify_password(&stored, "abc123"));
        assert!(!verify_password(&stored, "abc124"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_malformed_composites_rejected() {
        assert!(!verify_password("", "anything"));
        assert!(!verify_password("no-separator-here", "anything"));
        assert!(!verify_password(":deadbeef", "anything"));
        assert!(!verify_password("abcd:", "anything"));
        assert!(!verify_password("abcd:not-hex!", "anything"));
    }

    #[test]
    fn test_password_too_short() {
        assert!(Password::new("12345").is_err());
        assert!(Password::new("123456").is_ok());
    }

    #[test]
    fn test_debug_redacted() {
        let password = Password::new("hunter22").unwrap();
        assert!(!format!("{:?}", password).contains(password.as_str()));
    }
}
