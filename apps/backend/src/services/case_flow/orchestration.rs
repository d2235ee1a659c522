//! HTTP-facing composition: record the submission, then fire-and-forget the
//! owed background work.
//!
//! Background tasks re-enter the engine through the same entry points used
//! for human-initiated actions and inherit the request's trace id, so their
//! failures are logged correlated and never corrupt case state.

use tracing::warn;

use super::{CaseFlowService, FollowUp, SubmitArgument, SubmissionOutcome};
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::trace_ctx;

impl CaseFlowService {
    /// Record a submission, then spawn whatever follow-up it owes.
    pub async fn handle_submission(
        &self,
        state: &AppState,
        req: SubmitArgument,
    ) -> Result<SubmissionOutcome, AppError> {
        let outcome = self.submit_and_progress(state, req).await?;

        match outcome.follow_up {
            Some(FollowUp::OpponentReply) => spawn_opponent_reply(state, outcome.case_id),
            Some(FollowUp::Adjudicate) => spawn_adjudication(state, outcome.case_id),
            None => {}
        }

        Ok(outcome)
    }
}

fn spawn_opponent_reply(state: &AppState, case_id: i64) {
    let state = state.clone();
    let trace = trace_ctx::trace_id();

    tokio::spawn(trace_ctx::with_trace_id(trace, async move {
        let flow = CaseFlowService::new();
        match flow.drive_opponent(&state, case_id).await {
            // The opponent's reply can itself complete the stage pair and
            // push the case into the terminal stage.
            Ok(Some(outcome)) if outcome.follow_up == Some(FollowUp::Adjudicate) => {
                if let Err(err) = flow.adjudicate(&state, case_id).await {
                    warn!(case_id, error = %err, "background adjudication failed");
                }
            }
            Ok(_) => {}
            Err(err) => {
                warn!(case_id, error = %err, "background opponent generation failed");
            }
        }
    }));
}

fn spawn_adjudication(state: &AppState, case_id: i64) {
    let state = state.clone();
    let trace = trace_ctx::trace_id();

    tokio::spawn(trace_ctx::with_trace_id(trace, async move {
        if let Err(err) = CaseFlowService::new().adjudicate(&state, case_id).await {
            warn!(case_id, error = %err, "background adjudication failed");
        }
    }));
}
