//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `promote-admin` - Grant the admin flag from the command line

pub mod args;

pub use args::{Cli, Commands};
