//! Promote command - Grant the admin flag without the HTTP shared secret.

use crate::cli::args::PromoteArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the promote-admin command
pub async fn execute(args: PromoteArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let services = Services::from_connection(db.get_connection(), &config);
    let user = services.users().promote_to_admin(&args.email).await?;

    tracing::info!(user_id = %user.id, "User promoted to admin");
    println!("{} is now an administrator", user.email);

    Ok(())
}
