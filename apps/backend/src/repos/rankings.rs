//! Ranking-ledger repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::rankings_sea as rankings_adapter;
use crate::domain::scoring::SettlementDelta;
use crate::entities::rankings;
use crate::errors::domain::DomainError;

/// Per-identity competitive record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub id: i64,
    pub user_id: i64,
    pub score: i32,
    pub wins: i32,
    pub losses: i32,
    pub updated_at: time::OffsetDateTime,
}

impl From<rankings::Model> for RankingEntry {
    fn from(m: rankings::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            score: m.score,
            wins: m.wins,
            losses: m.losses,
            updated_at: m.updated_at,
        }
    }
}

pub async fn find_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<RankingEntry>, DomainError> {
    let row = rankings_adapter::find_by_user(conn, user_id).await?;
    Ok(row.map(RankingEntry::from))
}

pub async fn top_by_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<RankingEntry>, DomainError> {
    let rows = rankings_adapter::top_by_score(conn, limit).await?;
    Ok(rows.into_iter().map(RankingEntry::from).collect())
}

/// Apply one identity's settlement delta additively.
pub async fn apply_settlement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    delta: SettlementDelta,
) -> Result<(), DomainError> {
    let wins = matches!(delta.won, Some(true)) as i32;
    let losses = matches!(delta.won, Some(false)) as i32;
    rankings_adapter::apply_delta(conn, user_id, delta.score, wins, losses).await?;
    Ok(())
}
