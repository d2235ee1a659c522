//! SeaORM adapter for submissions.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::submissions;

pub mod dto;

pub use dto::SubmissionCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// All submissions for a case ordered by creation (id as the tiebreaker, so
/// ordering stays total for same-timestamp rows).
pub async fn find_all_by_case_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Vec<submissions::Model>, sea_orm::DbErr> {
    submissions::Entity::find()
        .filter(submissions::Column::CaseId.eq(case_id))
        .order_by_asc(submissions::Column::CreatedAt)
        .order_by_asc(submissions::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_case_and_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
    stage: crate::entities::cases::CaseStage,
) -> Result<Vec<submissions::Model>, sea_orm::DbErr> {
    submissions::Entity::find()
        .filter(submissions::Column::CaseId.eq(case_id))
        .filter(submissions::Column::Stage.eq(stage))
        .order_by_asc(submissions::Column::CreatedAt)
        .order_by_asc(submissions::Column::Id)
        .all(conn)
        .await
}

/// Insert a submission. The (case_id, stage, side) uniqueness constraint
/// makes duplicate submissions fail as a typed conflict.
pub async fn create_submission<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SubmissionCreate,
) -> Result<submissions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let submission_active = submissions::ActiveModel {
        id: NotSet,
        case_id: Set(dto.case_id),
        stage: Set(dto.stage),
        side: Set(dto.side),
        submitter_kind: Set(dto.submitter_kind),
        user_id: Set(dto.user_id),
        transcript: Set(dto.transcript),
        audio_url: Set(dto.audio_url),
        created_at: Set(now),
    };

    submission_active.insert(conn).await
}
