//! API middleware.

mod auth;
mod route_guard;

pub use auth::{require_operational_or_privileged, require_privileged};
pub use route_guard::{classify_path, decide, route_guard, GuardOutcome, PathClass};
