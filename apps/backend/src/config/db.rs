//! Database URL construction from environment variables.

use std::env;

use crate::error::AppError;

/// Database profile for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Production database
    Prod,
    /// Test database - enforces safety rules
    Test,
}

/// Access level for the connection
#[derive(Debug, Clone, PartialEq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Builds a Postgres URL from environment variables based on profile and owner.
pub fn db_url(profile: DbProfile, owner: DbOwner) -> Result<String, AppError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = db_name(profile)?;
    let (username, password) = credentials(owner)?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn db_name(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("PROD_DB"),
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            // Enforce safety: test DB must end with "_test"
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((must_var("COURT_OWNER_USER")?, must_var("COURT_OWNER_PASSWORD")?)),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::config(format!("{name} must be set")))
}
