//! Submission repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::submissions_sea as submissions_adapter;
use crate::domain::{Side, Stage, Submitter};
use crate::entities::submissions::{self, SubmitterKind};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// One argument contribution, immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub case_id: i64,
    pub stage: Stage,
    pub side: Side,
    pub submitter: Submitter,
    pub transcript: String,
    pub audio_url: Option<String>,
    pub created_at: time::OffsetDateTime,
}

impl TryFrom<submissions::Model> for Submission {
    type Error = DomainError;

    fn try_from(m: submissions::Model) -> Result<Self, Self::Error> {
        let submitter = match (m.submitter_kind, m.user_id) {
            (SubmitterKind::Human, Some(user_id)) => Submitter::Human(user_id),
            (SubmitterKind::Automated, None) => Submitter::AutomatedOpponent,
            (kind, user_id) => {
                return Err(DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!(
                        "submission {} has inconsistent submitter ({kind:?}, user_id {user_id:?})",
                        m.id
                    ),
                ));
            }
        };

        Ok(Self {
            id: m.id,
            case_id: m.case_id,
            stage: Stage::from(m.stage),
            side: Side::from(m.side),
            submitter,
            transcript: m.transcript,
            audio_url: m.audio_url,
            created_at: m.created_at,
        })
    }
}

/// All submissions for a case, ordered by creation time (id tiebreak).
pub async fn find_all_by_case_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Vec<Submission>, DomainError> {
    let rows = submissions_adapter::find_all_by_case_ordered(conn, case_id).await?;
    rows.into_iter().map(Submission::try_from).collect()
}

pub async fn find_by_case_and_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
    stage: Stage,
) -> Result<Vec<Submission>, DomainError> {
    let rows = submissions_adapter::find_by_case_and_stage(conn, case_id, stage.into()).await?;
    rows.into_iter().map(Submission::try_from).collect()
}

pub async fn create_submission<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: submissions_adapter::SubmissionCreate,
) -> Result<Submission, DomainError> {
    let row = submissions_adapter::create_submission(conn, dto).await?;
    Submission::try_from(row)
}

/// Per-side completeness for one stage's submissions.
pub fn stage_completeness(submissions: &[Submission]) -> (bool, bool) {
    let plaintiff = submissions.iter().any(|s| s.side == Side::Plaintiff);
    let defendant = submissions.iter().any(|s| s.side == Side::Defendant);
    (plaintiff, defendant)
}
