//! The "terminal stage and no result" entry point.
//!
//! Idempotent and self-healing: a case with an existing verdict skips
//! straight to settlement, so a run that died between persisting the verdict
//! and settling is repaired by the next trigger. An adjudicator failure
//! leaves nothing written; retriggering is safe.

use tracing::info;

use super::CaseFlowService;
use crate::adapters::case_results_sea::CaseResultCreate;
use crate::ai::CaseBrief;
use crate::db::txn::with_txn;
use crate::domain::transcript::StageBundle;
use crate::domain::Side;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::cases::Case;
use crate::repos::participants::{binding_for_side, Participant};
use crate::repos::verdicts::Verdict;
use crate::repos::{case_results, cases, participants, verdicts};
use crate::services::case_context::CaseContext;
use crate::state::app_state::AppState;

enum Prep {
    /// A verdict already exists; only settlement may still be owed.
    Existing {
        verdict: Verdict,
        case: Case,
        participants: Vec<Participant>,
    },
    /// Ready to adjudicate.
    Ready {
        brief: CaseBrief,
        bundle: Box<[StageBundle; 5]>,
        case: Case,
        participants: Vec<Participant>,
    },
}

impl CaseFlowService {
    /// Produce (or recover) the verdict for a case and apply settlement.
    pub async fn adjudicate(&self, state: &AppState, case_id: i64) -> Result<Verdict, AppError> {
        let prep = with_txn(state, |txn| {
            Box::pin(async move {
                // Idempotent guard: one verdict per case, ever.
                if let Some(verdict) = verdicts::find_by_case(txn, case_id).await? {
                    let case = cases::require_case(txn, case_id).await?;
                    let participants = participants::find_all_by_case(txn, case_id).await?;
                    return Ok(Prep::Existing {
                        verdict,
                        case,
                        participants,
                    });
                }

                let ctx = CaseContext::load(txn, case_id).await?;

                if !ctx.case.current_stage.is_terminal() {
                    return Err(AppError::not_ready(
                        "case has not reached the verdict stage",
                    ));
                }
                // Minimum viability: a human-vs-human case needs both sides
                // bound before the adjudicator is called.
                if !ctx.case.is_automated() {
                    let both_bound = binding_for_side(&ctx.participants, Side::Plaintiff).is_some()
                        && binding_for_side(&ctx.participants, Side::Defendant).is_some();
                    if !both_bound {
                        return Err(AppError::not_ready(
                            "both sides must have a participant before adjudication",
                        ));
                    }
                }

                Ok(Prep::Ready {
                    brief: ctx.case.brief(),
                    bundle: Box::new(ctx.bundle()),
                    case: ctx.case,
                    participants: ctx.participants,
                })
            })
        })
        .await?;

        let (mut verdict, case, bound) = match prep {
            Prep::Existing {
                verdict,
                case,
                participants,
            } => (verdict, case, participants),
            Prep::Ready {
                brief,
                bundle,
                case,
                participants,
            } => {
                // Long-running adjudication happens with no transaction held;
                // on failure nothing has been written and the case stays at
                // the terminal stage for a retry.
                let outcome = state
                    .ai
                    .adjudicator
                    .adjudicate(&brief, &bundle)
                    .await
                    .map_err(AppError::from)?;

                let plaintiff_user =
                    binding_for_side(&participants, Side::Plaintiff).map(|p| p.user_id);
                let defendant_user =
                    binding_for_side(&participants, Side::Defendant).map(|p| p.user_id);
                let plaintiff_score = outcome.scores.plaintiff.headline();
                let defendant_score = outcome.scores.defendant.headline();

                let persisted = with_txn(state, |txn| {
                    Box::pin(async move {
                        // Re-check under the transaction; the unique case_id
                        // index backs this up if two triggers still race.
                        if let Some(existing) = verdicts::find_by_case(txn, case_id).await? {
                            return Ok(existing);
                        }

                        let verdict = verdicts::insert_verdict(txn, case_id, &outcome).await?;
                        case_results::insert_result(
                            txn,
                            CaseResultCreate {
                                case_id,
                                plaintiff_user_id: plaintiff_user,
                                defendant_user_id: defendant_user,
                                winner: outcome.winner.map(Into::into),
                                plaintiff_score,
                                defendant_score,
                            },
                        )
                        .await?;
                        cases::mark_completed(txn, case_id).await?;

                        info!(case_id, winner = ?outcome.winner, "verdict persisted");
                        Ok(verdict)
                    })
                })
                .await;

                let verdict = match persisted {
                    Ok(verdict) => verdict,
                    Err(err) if err.code() == ErrorCode::VerdictExists => {
                        // A concurrent trigger inserted first; its row is the
                        // one and only verdict.
                        with_txn(state, |txn| {
                            Box::pin(
                                async move { Ok(verdicts::require_by_case(txn, case_id).await?) },
                            )
                        })
                        .await?
                    }
                    Err(err) => return Err(err),
                };

                (verdict, case, participants)
            }
        };

        if self.settle(state, &case, &bound, &verdict).await? {
            verdict.settlement_applied = true;
        }

        Ok(verdict)
    }
}
