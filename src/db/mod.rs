pub mod events;
pub mod models;
pub mod reminders;
pub mod shares;
pub mod todos;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Initialize the database connection pool and create the schema if absent.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run the schema script. Every statement is `IF NOT EXISTS`, so this is idempotent.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let sql = include_str!("../../migrations/001_initial.sql");

    // sqlx::query().execute() only runs the first statement.
    for statement in sql.split(';') {
        let trimmed = statement.trim();
        if trimmed.is_empty() {
            continue;
        }
        // Segments may be only comments (the tail after the last statement).
        let has_sql = trimmed.lines().any(|line| {
            let l = line.trim();
            !l.is_empty() && !l.starts_with("--")
        });
        if !has_sql {
            continue;
        }
        sqlx::query(trimmed).execute(pool).await?;
    }

    tracing::debug!("schema bootstrap complete");
    Ok(())
}

/// Create an in-memory pool for testing.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid in-memory url")
        .foreign_keys(true);

    // A single connection: every :memory: connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
