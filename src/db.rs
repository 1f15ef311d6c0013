use crate::error::ApiError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Type alias for the PostgreSQL connection pool
pub type DbPool = PgPool;

/// Creates and configures a PostgreSQL connection pool
///
/// # Arguments
/// * `database_url` - PostgreSQL connection string
///
/// # Returns
/// * `Result<DbPool>` - Configured connection pool or error
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    tracing::debug!("Creating database connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Check if a service with the given name already exists
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `name` - Service name to check for duplicates
///
/// # Returns
/// * `Result<bool, ApiError>` - True if duplicate exists, false otherwise
pub async fn check_duplicate_service(pool: &PgPool, name: &str) -> Result<bool, ApiError> {
    tracing::debug!("Checking for duplicate service: {}", name);

    let exists: Option<bool> =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM services WHERE name = $1)")
            .bind(name)
            .fetch_one(pool)
            .await?;

    let is_duplicate = exists.unwrap_or(false);
    if is_duplicate {
        tracing::debug!("Duplicate service found: {}", name);
    }

    Ok(is_duplicate)
}

/// Check if a service with the given name already exists, excluding a
/// specific ID. Used for update operations so a service can keep its
/// name; takes an executor so the check can run inside the update's
/// transaction.
pub async fn check_duplicate_service_excluding_id(
    executor: impl sqlx::PgExecutor<'_>,
    name: &str,
    exclude_id: i32,
) -> Result<bool, ApiError> {
    let exists: Option<bool> =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM services WHERE name = $1 AND id != $2)")
            .bind(name)
            .bind(exclude_id)
            .fetch_one(executor)
            .await?;

    Ok(exists.unwrap_or(false))
}
