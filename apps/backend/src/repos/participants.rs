//! Participant repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::participants_sea as participants_adapter;
use crate::domain::Side;
use crate::entities::case_participants;
use crate::errors::domain::DomainError;

/// One identity bound to one side of one case. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: i64,
    pub case_id: i64,
    pub user_id: i64,
    pub side: Side,
    pub created_at: time::OffsetDateTime,
}

impl From<case_participants::Model> for Participant {
    fn from(m: case_participants::Model) -> Self {
        Self {
            id: m.id,
            case_id: m.case_id,
            user_id: m.user_id,
            side: Side::from(m.side),
            created_at: m.created_at,
        }
    }
}

/// Find the binding for a side, if any.
pub fn binding_for_side(participants: &[Participant], side: Side) -> Option<&Participant> {
    participants.iter().find(|p| p.side == side)
}

/// Resolve which side a user argues, if they are bound.
pub fn side_of_user(participants: &[Participant], user_id: i64) -> Option<Side> {
    participants
        .iter()
        .find(|p| p.user_id == user_id)
        .map(|p| p.side)
}

pub async fn find_all_by_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Vec<Participant>, DomainError> {
    let rows = participants_adapter::find_all_by_case(conn, case_id).await?;
    Ok(rows.into_iter().map(Participant::from).collect())
}

pub async fn find_by_case_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
    user_id: i64,
) -> Result<Option<Participant>, DomainError> {
    let row = participants_adapter::find_by_case_and_user(conn, case_id, user_id).await?;
    Ok(row.map(Participant::from))
}

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
    user_id: i64,
    side: Side,
) -> Result<Participant, DomainError> {
    let row = participants_adapter::create_participant(
        conn,
        participants_adapter::ParticipantCreate::new(case_id, user_id, side.into()),
    )
    .await?;
    Ok(Participant::from(row))
}
