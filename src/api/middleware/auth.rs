//! Handler-local authorization checks.
//!
//! API routes pass the edge guard untouched; each handler resolves the
//! current user and calls one of these.

use crate::domain::{access, SafeUser};
use crate::errors::AppError;

/// Require a privileged user, returns Forbidden otherwise.
pub fn require_privileged(user: &SafeUser) -> Result<(), AppError> {
    if access::is_privileged(user) {
        Ok(())
    } else {
        tracing::warn!(user_id = %user.id, role = %user.role, "Privileged access denied");
        Err(AppError::Forbidden)
    }
}

/// Require a privileged user or any signed-in operational role.
pub fn require_operational_or_privileged(user: &SafeUser) -> Result<(), AppError> {
    if access::is_privileged(user) || access::is_operational(user) {
        Ok(())
    } else {
        tracing::warn!(user_id = %user.id, role = %user.role, "Operational access denied");
        Err(AppError::Forbidden)
    }
}
