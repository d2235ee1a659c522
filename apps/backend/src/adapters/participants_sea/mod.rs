//! SeaORM adapter for case participants.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::case_participants;

pub mod dto;

pub use dto::ParticipantCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_all_by_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Vec<case_participants::Model>, sea_orm::DbErr> {
    case_participants::Entity::find()
        .filter(case_participants::Column::CaseId.eq(case_id))
        .order_by_asc(case_participants::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_case_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
    user_id: i64,
) -> Result<Option<case_participants::Model>, sea_orm::DbErr> {
    case_participants::Entity::find()
        .filter(case_participants::Column::CaseId.eq(case_id))
        .filter(case_participants::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Insert a binding. The (case_id, side) and (case_id, user_id) uniqueness
/// constraints turn races into typed conflicts at the repo layer.
pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParticipantCreate,
) -> Result<case_participants::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let participant_active = case_participants::ActiveModel {
        id: NotSet,
        case_id: Set(dto.case_id),
        user_id: Set(dto.user_id),
        side: Set(dto.side),
        created_at: Set(now),
    };

    participant_active.insert(conn).await
}
