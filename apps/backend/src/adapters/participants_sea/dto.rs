//! DTOs for participants_sea adapter.

use crate::entities::cases::CaseSide;

/// DTO for binding an identity to a side of a case.
#[derive(Debug, Clone)]
pub struct ParticipantCreate {
    pub case_id: i64,
    pub user_id: i64,
    pub side: CaseSide,
}

impl ParticipantCreate {
    pub fn new(case_id: i64, user_id: i64, side: CaseSide) -> Self {
        Self {
            case_id,
            user_id,
            side,
        }
    }
}
