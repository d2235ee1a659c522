//! SeaORM adapter for verdicts.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::verdicts;

pub mod dto;

pub use dto::VerdictCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Option<verdicts::Model>, sea_orm::DbErr> {
    verdicts::Entity::find()
        .filter(verdicts::Column::CaseId.eq(case_id))
        .one(conn)
        .await
}

/// Insert the verdict row. Exactly-once is backed by the unique case_id
/// constraint; a losing concurrent insert surfaces as a unique violation.
pub async fn insert_verdict<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: VerdictCreate,
) -> Result<verdicts::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let verdict_active = verdicts::ActiveModel {
        id: NotSet,
        case_id: Set(dto.case_id),
        winner: Set(dto.winner),
        result: Set(dto.result),
        settlement_applied: Set(false),
        created_at: Set(now),
    };

    verdict_active.insert(conn).await
}

/// Conditionally claim settlement for a verdict.
///
/// Returns true when this caller flipped the flag and therefore owns the
/// one-and-only ranking application; false when settlement was already
/// applied (or claimed) by someone else.
pub async fn try_mark_settlement_applied<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    verdict_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let result = verdicts::Entity::update_many()
        .col_expr(verdicts::Column::SettlementApplied, Expr::val(true).into())
        .filter(verdicts::Column::Id.eq(verdict_id))
        .filter(verdicts::Column::SettlementApplied.eq(false))
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}
