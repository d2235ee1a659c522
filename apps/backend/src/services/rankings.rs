//! Leaderboard read service.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::error::AppError;
use crate::repos::{rankings, users};

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub user_id: i64,
    pub username: String,
    pub score: i32,
    pub wins: i32,
    pub losses: i32,
}

/// Top entries by score with display names attached.
pub async fn leaderboard<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<LeaderboardRow>, AppError> {
    let entries = rankings::top_by_score(conn, limit).await?;

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let user = users::require_user(conn, entry.user_id).await?;
        rows.push(LeaderboardRow {
            user_id: entry.user_id,
            username: user.username,
            score: entry.score,
            wins: entry.wins,
            losses: entry.losses,
        });
    }

    Ok(rows)
}
