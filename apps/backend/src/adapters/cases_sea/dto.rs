//! DTOs for cases_sea adapter.

use crate::entities::cases::{CaseCategory, CaseSide, OpponentKind};

/// DTO for creating a new case.
#[derive(Debug, Clone)]
pub struct CaseCreate {
    pub title: String,
    pub summary: String,
    pub category: CaseCategory,
    pub opponent_kind: OpponentKind,
    pub automated_side: Option<CaseSide>,
    pub created_by: i64,
    pub join_code: Option<String>,
}

impl CaseCreate {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        category: CaseCategory,
        created_by: i64,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            category,
            opponent_kind: OpponentKind::Human,
            automated_side: None,
            created_by,
            join_code: None,
        }
    }

    pub fn with_automated_opponent(mut self, side: CaseSide) -> Self {
        self.opponent_kind = OpponentKind::Automated;
        self.automated_side = Some(side);
        self
    }

    pub fn with_join_code(mut self, code: impl Into<String>) -> Self {
        self.join_code = Some(code.into());
        self
    }
}
