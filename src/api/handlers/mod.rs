//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod church_handler;
pub mod page_handler;
pub mod profile_handler;
pub mod responses;
pub mod user_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::auth_routes;
pub use church_handler::church_routes;
pub use page_handler::page_routes;
pub use profile_handler::profile_routes;
pub use user_handler::user_routes;
