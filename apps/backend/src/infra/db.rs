//! Database connection bootstrap.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Connect to the given database URL.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_string());
    opts.sqlx_logging(false);

    Database::connect(opts)
        .await
        .map_err(|e| AppError::db(format!("failed to connect to database: {e}")))
}

/// Single entrypoint for app startup: build the URL, connect, run migrations.
pub async fn bootstrap_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, owner)?;
    let conn = connect_db(&url).await?;

    migration::migrate(&conn, migration::MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;

    Ok(conn)
}

/// In-memory SQLite, fully migrated. Used by integration tests and offline
/// development runs.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn connect_sqlite_memory() -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).sqlx_logging(false);

    let conn = Database::connect(opts)
        .await
        .map_err(|e| AppError::db(format!("failed to open in-memory sqlite: {e}")))?;

    migration::migrate(&conn, migration::MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;

    Ok(conn)
}
