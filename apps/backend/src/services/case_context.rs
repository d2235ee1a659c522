//! Case context: everything the assemblers need, loaded once.
//!
//! Side resolution follows the participant bindings (and the case's recorded
//! automated side for sentinel submissions), never submission order. A
//! submission whose author has no binding is skipped rather than guessed at.

use sea_orm::ConnectionTrait;

use crate::domain::transcript::{
    assemble_bundle, assemble_context, ArgumentContext, StageBundle, TranscriptEntry,
};
use crate::domain::{Side, Stage, Submitter};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::cases::Case;
use crate::repos::participants::{side_of_user, Participant};
use crate::repos::submissions::Submission;
use crate::repos::{cases, participants, submissions};

/// A case with its bindings and side-resolved transcript entries, in
/// creation order.
#[derive(Debug, Clone)]
pub struct CaseContext {
    pub case: Case,
    pub participants: Vec<Participant>,
    pub entries: Vec<TranscriptEntry>,
}

impl CaseContext {
    /// Load case, participant bindings and all submissions, resolving each
    /// submission's side from the bindings.
    pub async fn load<C: ConnectionTrait + Send + Sync>(
        conn: &C,
        case_id: i64,
    ) -> Result<Self, DomainError> {
        let case = cases::require_case(conn, case_id).await?;
        let participants = participants::find_all_by_case(conn, case_id).await?;
        let rows = submissions::find_all_by_case_ordered(conn, case_id).await?;

        let mut entries = Vec::with_capacity(rows.len());
        for submission in rows {
            if let Some(side) = resolve_side(&case, &participants, &submission)? {
                entries.push(TranscriptEntry {
                    stage: submission.stage,
                    side,
                    text: submission.transcript,
                });
            }
        }

        Ok(Self {
            case,
            participants,
            entries,
        })
    }

    /// Generation context for `for_side` arguing `stage`.
    pub fn argument_context(&self, stage: Stage, for_side: Side) -> ArgumentContext {
        assemble_context(&self.entries, stage, for_side)
    }

    /// Adjudication bundle over all five argued stages.
    pub fn bundle(&self) -> [StageBundle; 5] {
        assemble_bundle(&self.entries)
    }
}

/// Resolve a submission's side: the recorded automated side for the sentinel,
/// the participant binding for a human. `Ok(None)` means "no binding" and the
/// submission is left out of the transcript.
fn resolve_side(
    case: &Case,
    participants: &[Participant],
    submission: &Submission,
) -> Result<Option<Side>, DomainError> {
    match submission.submitter {
        Submitter::AutomatedOpponent => {
            let side = case.automated_side.ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!(
                        "case {} has an automated submission but no automated side",
                        case.id
                    ),
                )
            })?;
            Ok(Some(side))
        }
        Submitter::Human(user_id) => Ok(side_of_user(participants, user_id)),
    }
}
