//! DTOs for submissions_sea adapter.

use crate::entities::cases::{CaseSide, CaseStage};
use crate::entities::submissions::SubmitterKind;

/// DTO for recording one argument contribution.
#[derive(Debug, Clone)]
pub struct SubmissionCreate {
    pub case_id: i64,
    pub stage: CaseStage,
    pub side: CaseSide,
    pub submitter_kind: SubmitterKind,
    pub user_id: Option<i64>,
    pub transcript: String,
    pub audio_url: Option<String>,
}

impl SubmissionCreate {
    pub fn human(
        case_id: i64,
        stage: CaseStage,
        side: CaseSide,
        user_id: i64,
        transcript: impl Into<String>,
    ) -> Self {
        Self {
            case_id,
            stage,
            side,
            submitter_kind: SubmitterKind::Human,
            user_id: Some(user_id),
            transcript: transcript.into(),
            audio_url: None,
        }
    }

    pub fn automated(
        case_id: i64,
        stage: CaseStage,
        side: CaseSide,
        transcript: impl Into<String>,
    ) -> Self {
        Self {
            case_id,
            stage,
            side,
            submitter_kind: SubmitterKind::Automated,
            user_id: None,
            transcript: transcript.into(),
            audio_url: None,
        }
    }

    pub fn with_audio_url(mut self, audio_url: impl Into<String>) -> Self {
        self.audio_url = Some(audio_url.into());
        self
    }
}
