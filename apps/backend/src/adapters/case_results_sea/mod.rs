//! SeaORM adapter for the denormalized case_results table.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::case_results;
use crate::entities::cases::CaseSide;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// DTO for the headline result row.
#[derive(Debug, Clone)]
pub struct CaseResultCreate {
    pub case_id: i64,
    pub plaintiff_user_id: Option<i64>,
    pub defendant_user_id: Option<i64>,
    pub winner: Option<CaseSide>,
    pub plaintiff_score: i16,
    pub defendant_score: i16,
}

pub async fn find_by_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Option<case_results::Model>, sea_orm::DbErr> {
    case_results::Entity::find()
        .filter(case_results::Column::CaseId.eq(case_id))
        .one(conn)
        .await
}

pub async fn insert_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CaseResultCreate,
) -> Result<case_results::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result_active = case_results::ActiveModel {
        id: NotSet,
        case_id: Set(dto.case_id),
        plaintiff_user_id: Set(dto.plaintiff_user_id),
        defendant_user_id: Set(dto.defendant_user_id),
        winner: Set(dto.winner),
        plaintiff_score: Set(dto.plaintiff_score),
        defendant_score: Set(dto.defendant_score),
        created_at: Set(now),
    };

    result_active.insert(conn).await
}
