//! Database connection pool.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::settings::Database;

/// Tables the edit-profile feature depends on.
pub const PROFILE_TABLES: [&str; 3] = ["app_user", "employer", "freelancer"];

/// Open a connection pool and check that a connection can be acquired.
pub async fn connect(settings: &Database) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.connections)
        .connect(&settings.connection_url())
        .await
}

/// Return the entries of [`PROFILE_TABLES`] that do not exist in the database.
pub async fn missing_tables(pool: &PgPool) -> Result<Vec<&'static str>, sqlx::Error> {
    let mut missing = Vec::new();
    for table in PROFILE_TABLES {
        let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
            .bind(table)
            .fetch_one(pool)
            .await?;
        if !exists {
            missing.push(table);
        }
    }
    Ok(missing)
}
