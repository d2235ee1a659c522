//! Denormalized case-result repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::case_results_sea as results_adapter;
use crate::domain::Side;
use crate::entities::case_results;
use crate::errors::domain::DomainError;

/// Headline row for a decided case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub id: i64,
    pub case_id: i64,
    pub plaintiff_user_id: Option<i64>,
    pub defendant_user_id: Option<i64>,
    pub winner: Option<Side>,
    pub plaintiff_score: i16,
    pub defendant_score: i16,
    pub created_at: time::OffsetDateTime,
}

impl From<case_results::Model> for CaseResult {
    fn from(m: case_results::Model) -> Self {
        Self {
            id: m.id,
            case_id: m.case_id,
            plaintiff_user_id: m.plaintiff_user_id,
            defendant_user_id: m.defendant_user_id,
            winner: m.winner.map(Side::from),
            plaintiff_score: m.plaintiff_score,
            defendant_score: m.defendant_score,
            created_at: m.created_at,
        }
    }
}

pub async fn find_by_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Option<CaseResult>, DomainError> {
    let row = results_adapter::find_by_case(conn, case_id).await?;
    Ok(row.map(CaseResult::from))
}

pub async fn insert_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: results_adapter::CaseResultCreate,
) -> Result<CaseResult, DomainError> {
    let row = results_adapter::insert_result(conn, dto).await?;
    Ok(CaseResult::from(row))
}
