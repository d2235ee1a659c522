//! The "submission occurred" entry point.

use tracing::{debug, info};

use super::{CaseFlowService, FollowUp, SubmitArgument, SubmissionOutcome};
use crate::adapters::submissions_sea::SubmissionCreate;
use crate::db::txn::with_txn;
use crate::domain::{Side, Stage, Submitter};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::submissions::stage_completeness;
use crate::repos::{cases, participants, submissions};
use crate::state::app_state::AppState;

struct Recorded {
    submission_id: i64,
    side: Side,
    transcript: String,
}

struct Progress {
    advanced_to: Option<Stage>,
    follow_up: Option<FollowUp>,
}

impl CaseFlowService {
    /// Record one submission and, when both sides are now in for the current
    /// stage, perform the stage transition.
    ///
    /// Recording and progression run in separate transactions. The insert
    /// commits first, so of two racing submission events the later committer
    /// always evaluates against both rows - the pair can never go
    /// unobserved. The transition itself is a compare-and-set on
    /// (current_stage, lock_version), so at most one event performs it, and
    /// only that one owes the follow-up. Audio-only submissions are
    /// transcribed before any transaction opens so the long call never holds
    /// a connection.
    pub async fn submit_and_progress(
        &self,
        state: &AppState,
        req: SubmitArgument,
    ) -> Result<SubmissionOutcome, AppError> {
        let SubmitArgument {
            case_id,
            submitter,
            stage,
            transcript,
            audio_url,
        } = req;

        let transcript = match (
            transcript.filter(|t| !t.trim().is_empty()),
            audio_url.clone(),
        ) {
            (Some(text), _) => text,
            (None, Some(url)) => state
                .ai
                .transcriber
                .transcribe(&url)
                .await
                .map_err(AppError::from)?,
            (None, None) => {
                return Err(AppError::validation(
                    ErrorCode::MissingTranscript,
                    "a transcript or an audio reference is required",
                ))
            }
        };

        let recorded = with_txn(state, |txn| {
            Box::pin(async move {
                let case = cases::require_case(txn, case_id).await?;

                if case.is_completed() || case.current_stage.is_terminal() {
                    return Err(AppError::conflict(
                        ErrorCode::CaseCompleted,
                        "case no longer accepts submissions",
                    ));
                }
                if stage != case.current_stage {
                    return Err(AppError::validation(
                        ErrorCode::StageMismatch,
                        format!(
                            "submission targets stage {stage} but the case is at {}",
                            case.current_stage
                        ),
                    ));
                }

                let side = match submitter {
                    Submitter::Human(user_id) => {
                        participants::find_by_case_and_user(txn, case_id, user_id)
                            .await?
                            .map(|p| p.side)
                            .ok_or_else(|| {
                                AppError::bad_request(
                                    ErrorCode::NotAParticipant,
                                    format!(
                                        "user {user_id} is not a participant of case {case_id}"
                                    ),
                                )
                            })?
                    }
                    Submitter::AutomatedOpponent => {
                        if !case.is_automated() {
                            return Err(AppError::bad_request(
                                ErrorCode::OpponentNotAutomated,
                                "case does not have an automated opponent",
                            ));
                        }
                        case.automated_side.ok_or_else(|| {
                            AppError::internal("automated case has no automated side recorded")
                        })?
                    }
                };

                let mut dto = match submitter {
                    Submitter::Human(user_id) => SubmissionCreate::human(
                        case_id,
                        stage.into(),
                        side.into(),
                        user_id,
                        transcript,
                    ),
                    Submitter::AutomatedOpponent => {
                        SubmissionCreate::automated(case_id, stage.into(), side.into(), transcript)
                    }
                };
                if let Some(url) = audio_url {
                    dto = dto.with_audio_url(url);
                }

                // Uniqueness on (case, stage, side) turns a duplicate into a
                // typed conflict here.
                let submission = submissions::create_submission(txn, dto).await?;

                Ok(Recorded {
                    submission_id: submission.id,
                    side: submission.side,
                    transcript: submission.transcript,
                })
            })
        })
        .await?;

        let progress = self
            .evaluate_progress(state, case_id, stage, submitter)
            .await?;

        Ok(SubmissionOutcome {
            case_id,
            submission_id: recorded.submission_id,
            stage,
            side: recorded.side,
            transcript: recorded.transcript,
            advanced_to: progress.advanced_to,
            follow_up: progress.follow_up,
        })
    }

    /// Recompute per-side completeness for `submitted_stage` and advance the
    /// case if complete. Runs against committed state.
    async fn evaluate_progress(
        &self,
        state: &AppState,
        case_id: i64,
        submitted_stage: Stage,
        submitter: Submitter,
    ) -> Result<Progress, AppError> {
        with_txn(state, |txn| {
            Box::pin(async move {
                let case = cases::require_case(txn, case_id).await?;

                // Someone else already moved the case past the stage we
                // submitted for; the transition happened exactly once.
                if case.current_stage != submitted_stage {
                    debug!(case_id, "stage already advanced by a concurrent event");
                    return Ok(Progress {
                        advanced_to: None,
                        follow_up: None,
                    });
                }

                let stage_rows =
                    submissions::find_by_case_and_stage(txn, case_id, submitted_stage).await?;
                let (plaintiff_in, defendant_in) = stage_completeness(&stage_rows);

                let mut advanced_to = None;
                if plaintiff_in && defendant_in {
                    let advanced = cases::try_advance_stage(
                        txn,
                        case_id,
                        submitted_stage,
                        submitted_stage.next(),
                        case.lock_version,
                    )
                    .await?;

                    match advanced {
                        Some(updated) => {
                            info!(
                                case_id,
                                from = %submitted_stage,
                                to = %updated.current_stage,
                                "stage advanced"
                            );
                            advanced_to = Some(updated.current_stage);
                        }
                        None => {
                            debug!(case_id, "stage transition lost the race; already advanced");
                        }
                    }
                }

                let follow_up = match advanced_to {
                    Some(Stage::Verdict) => Some(FollowUp::Adjudicate),
                    Some(_) => None,
                    None => {
                        let automated_owes = case.is_automated()
                            && !submitter.is_automated()
                            && match case.automated_side {
                                Some(Side::Plaintiff) => !plaintiff_in,
                                Some(Side::Defendant) => !defendant_in,
                                None => false,
                            };
                        automated_owes.then_some(FollowUp::OpponentReply)
                    }
                };

                Ok(Progress {
                    advanced_to,
                    follow_up,
                })
            })
        })
        .await
    }
}
