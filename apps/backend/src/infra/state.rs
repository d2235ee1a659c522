//! Unified AppState builder for main and tests.

use sea_orm::DatabaseConnection;

use crate::ai::AiHandles;
use crate::config::db::{DbOwner, DbProfile};
use crate::error::AppError;
use crate::infra::db::{bootstrap_db, connect_sqlite_memory};
use crate::state::app_state::AppState;

enum DbChoice {
    Profile(DbProfile),
    SqliteMemory,
    Existing(DatabaseConnection),
}

/// Builder for creating AppState instances.
///
/// Collaborators default to the scripted implementations; production startup
/// overrides them with the OpenAI-backed handles.
pub struct StateBuilder {
    db: Option<DbChoice>,
    ai: Option<AiHandles>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self { db: None, ai: None }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db = Some(DbChoice::Profile(profile));
        self
    }

    pub fn with_sqlite_memory(mut self) -> Self {
        self.db = Some(DbChoice::SqliteMemory);
        self
    }

    pub fn with_db_conn(mut self, conn: DatabaseConnection) -> Self {
        self.db = Some(DbChoice::Existing(conn));
        self
    }

    pub fn with_ai(mut self, ai: AiHandles) -> Self {
        self.ai = Some(ai);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let db = match self.db {
            Some(DbChoice::Profile(profile)) => bootstrap_db(profile, DbOwner::App).await?,
            Some(DbChoice::SqliteMemory) => connect_sqlite_memory().await?,
            Some(DbChoice::Existing(conn)) => conn,
            None => {
                return Err(AppError::config(
                    "StateBuilder requires a database; call with_db / with_sqlite_memory",
                ))
            }
        };

        let ai = self.ai.unwrap_or_else(AiHandles::scripted);
        Ok(AppState::new(db, ai))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
