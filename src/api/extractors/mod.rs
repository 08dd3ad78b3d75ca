//! Custom request extractors.

mod current_user;
mod validated_json;

pub use current_user::{CurrentUser, OptionalUser};
pub use validated_json::{field_errors, ValidatedJson};
