use sea_orm::DatabaseConnection;

use crate::ai::AiHandles;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// External collaborator handles (generation, adjudication, transcription)
    pub ai: AiHandles,
}

impl AppState {
    pub fn new(db: DatabaseConnection, ai: AiHandles) -> Self {
        Self { db, ai }
    }
}
