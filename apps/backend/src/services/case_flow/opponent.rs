//! Automated-opponent coordination.
//!
//! Runs as background work after a human submission: if the automated side
//! still owes the current stage, assemble the context, generate the reply,
//! and feed it back through the same `submit_and_progress` entry point as a
//! `Submitter::AutomatedOpponent` event. There is no second state-update
//! path.

use tracing::{debug, info};

use super::{CaseFlowService, SubmitArgument, SubmissionOutcome};
use crate::ai::CaseBrief;
use crate::db::txn::with_txn;
use crate::domain::transcript::ArgumentContext;
use crate::domain::{Side, Stage, Submitter};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::submissions::{self, stage_completeness};
use crate::services::case_context::CaseContext;
use crate::state::app_state::AppState;

/// Everything gathered under the transaction; the generator call happens
/// outside it.
struct GenerationPlan {
    brief: CaseBrief,
    ctx: ArgumentContext,
    stage: Stage,
    side: Side,
}

impl CaseFlowService {
    /// Generate and record the automated opponent's contribution for the
    /// current stage, if one is owed.
    ///
    /// Returns `Ok(None)` when nothing is owed (stage already answered, case
    /// terminal, or a concurrent reply won the race) - retriggering is always
    /// safe.
    pub async fn drive_opponent(
        &self,
        state: &AppState,
        case_id: i64,
    ) -> Result<Option<SubmissionOutcome>, AppError> {
        let plan = with_txn(state, |txn| {
            Box::pin(async move {
                let ctx = CaseContext::load(txn, case_id).await?;

                if !ctx.case.is_automated() {
                    return Err(AppError::bad_request(
                        ErrorCode::OpponentNotAutomated,
                        "case does not have an automated opponent",
                    ));
                }
                if ctx.case.is_completed() || ctx.case.current_stage.is_terminal() {
                    return Ok(None);
                }
                let Some(side) = ctx.case.automated_side else {
                    return Err(AppError::internal(
                        "automated case has no automated side recorded",
                    ));
                };

                let stage = ctx.case.current_stage;
                let stage_rows = submissions::find_by_case_and_stage(txn, case_id, stage).await?;
                let (plaintiff_in, defendant_in) = stage_completeness(&stage_rows);
                let owes = match side {
                    Side::Plaintiff => !plaintiff_in,
                    Side::Defendant => !defendant_in,
                };
                if !owes {
                    debug!(case_id, %stage, "automated side already submitted; nothing owed");
                    return Ok(None);
                }

                Ok(Some(GenerationPlan {
                    brief: ctx.case.brief(),
                    ctx: ctx.argument_context(stage, side),
                    stage,
                    side,
                }))
            })
        })
        .await?;

        let Some(plan) = plan else {
            return Ok(None);
        };

        // Long-running generation happens with no transaction held; its
        // timeout and bounded retries live in the client.
        let text = state
            .ai
            .generator
            .generate_argument(&plan.brief, &plan.ctx, plan.stage, plan.side)
            .await
            .map_err(AppError::from)?;

        info!(case_id, stage = %plan.stage, "automated argument generated");

        let result = self
            .submit_and_progress(
                state,
                SubmitArgument {
                    case_id,
                    submitter: Submitter::AutomatedOpponent,
                    stage: plan.stage,
                    transcript: Some(text),
                    audio_url: None,
                },
            )
            .await;

        match result {
            Ok(outcome) => Ok(Some(outcome)),
            // A concurrent event got there first (duplicate reply, or the
            // stage moved on). The case is consistent; nothing to do.
            Err(err)
                if matches!(
                    err.code(),
                    ErrorCode::DuplicateSubmission
                        | ErrorCode::StageMismatch
                        | ErrorCode::CaseCompleted
                ) =>
            {
                debug!(case_id, code = %err.code(), "opponent reply superseded; skipping");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
