//! DTOs for verdicts_sea adapter.

use crate::entities::cases::CaseSide;

/// DTO for persisting an adjudication outcome.
#[derive(Debug, Clone)]
pub struct VerdictCreate {
    pub case_id: i64,
    pub winner: Option<CaseSide>,
    /// Full structured outcome, serialized.
    pub result: serde_json::Value,
}

impl VerdictCreate {
    pub fn new(case_id: i64, winner: Option<CaseSide>, result: serde_json::Value) -> Self {
        Self {
            case_id,
            winner,
            result,
        }
    }
}
