//! Ranking settlement: applies the award policy to a verdict, exactly once,
//! and only for human-vs-human cases.

use tracing::{debug, info, warn};

use super::CaseFlowService;
use crate::db::txn::with_txn;
use crate::domain::scoring::{settlement_deltas, SettlementDelta};
use crate::entities::cases::OpponentKind;
use crate::error::AppError;
use crate::repos::cases::Case;
use crate::repos::participants::{binding_for_side, Participant};
use crate::repos::verdicts::Verdict;
use crate::repos::{rankings, users, verdicts};
use crate::state::app_state::AppState;

impl CaseFlowService {
    /// Apply ranking deltas for a verdict. Returns true when this call
    /// performed the application.
    ///
    /// Exactly-once is enforced by the `settlement_applied` claim: the flag
    /// flip and the ranking updates share one transaction, so a failure
    /// unclaims and a duplicate trigger finds the flag already set.
    pub(super) async fn settle(
        &self,
        state: &AppState,
        case: &Case,
        participants: &[Participant],
        verdict: &Verdict,
    ) -> Result<bool, AppError> {
        // Never for automated-opponent cases.
        if case.opponent_kind != OpponentKind::Human {
            debug!(case_id = case.id, "automated-opponent case; settlement skipped");
            return Ok(false);
        }
        if verdict.settlement_applied {
            return Ok(false);
        }

        let verdict_id = verdict.id;
        let case_id = case.id;
        let assignments: Vec<(i64, SettlementDelta)> = settlement_deltas(verdict.winner)
            .into_iter()
            .filter_map(|(side, delta)| {
                binding_for_side(participants, side).map(|p| (p.user_id, delta))
            })
            .collect();

        with_txn(state, |txn| {
            Box::pin(async move {
                if !verdicts::try_mark_settlement_applied(txn, verdict_id).await? {
                    debug!(case_id, "settlement already applied; skipping");
                    return Ok(false);
                }

                for (user_id, delta) in assignments {
                    // Defensive double-check: a flagged non-human identity
                    // never reaches the ledger, even if bound as a
                    // participant.
                    let user = users::require_user(txn, user_id).await?;
                    if user.is_ai {
                        warn!(case_id, user_id, "non-human identity excluded from settlement");
                        continue;
                    }
                    rankings::apply_settlement(txn, user_id, delta).await?;
                }

                info!(case_id, verdict_id, "settlement applied");
                Ok(true)
            })
        })
        .await
    }
}
