//! SeaORM adapter for the cases table - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::cases;

pub mod dto;

pub use dto::CaseCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Option<cases::Model>, sea_orm::DbErr> {
    cases::Entity::find_by_id(case_id).one(conn).await
}

/// Find case by ID or return a structured not-found error.
pub async fn require_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<cases::Model, sea_orm::DbErr> {
    find_by_id(conn, case_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("CASE_NOT_FOUND:{case_id}")))
}

pub async fn find_by_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    join_code: &str,
) -> Result<Option<cases::Model>, sea_orm::DbErr> {
    cases::Entity::find()
        .filter(cases::Column::JoinCode.eq(join_code))
        .one(conn)
        .await
}

pub async fn create_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CaseCreate,
) -> Result<cases::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let case_active = cases::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        summary: Set(dto.summary),
        category: Set(dto.category),
        opponent_kind: Set(dto.opponent_kind),
        automated_side: Set(dto.automated_side),
        created_by: Set(dto.created_by),
        join_code: Set(dto.join_code),
        current_stage: Set(cases::CaseStage::OpeningStatement),
        status: Set(cases::CaseStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };

    case_active.insert(conn).await
}

/// Compare-and-set stage transition.
///
/// Performs a single conditional update filtered on the expected current
/// stage and lock version, bumping `lock_version`. Returns:
/// - `Ok(Some(model))` - this caller performed the transition
/// - `Ok(None)` - the case exists but was already moved past `from`
///   (a concurrent submission won the race); callers treat this as benign
/// - `Err(RecordNotFound)` - no such case
pub async fn try_advance_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
    from: cases::CaseStage,
    to: cases::CaseStage,
    expected_lock_version: i32,
) -> Result<Option<cases::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = cases::Entity::update_many()
        .col_expr(cases::Column::CurrentStage, Expr::val(to).into())
        .col_expr(cases::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            cases::Column::LockVersion,
            Expr::col(cases::Column::LockVersion).add(1),
        )
        .filter(cases::Column::Id.eq(case_id))
        .filter(cases::Column::CurrentStage.eq(from))
        .filter(cases::Column::LockVersion.eq(expected_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        // Distinguish "case gone" from "lost the race".
        let exists = cases::Entity::find_by_id(case_id).one(conn).await?;
        return match exists {
            Some(_) => Ok(None),
            None => Err(sea_orm::DbErr::RecordNotFound(format!(
                "Case {case_id} not found"
            ))),
        };
    }

    let updated = require_case(conn, case_id).await?;
    Ok(Some(updated))
}

/// Mark a case completed after its verdict is persisted.
pub async fn mark_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    cases::Entity::update_many()
        .col_expr(cases::Column::Status, Expr::val(cases::CaseStatus::Completed).into())
        .col_expr(cases::Column::UpdatedAt, Expr::val(now).into())
        .filter(cases::Column::Id.eq(case_id))
        .exec(conn)
        .await?;

    Ok(())
}
