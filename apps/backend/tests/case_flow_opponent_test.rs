//! Automated-opponent flow: replies enter through the same submission entry
//! point, partitioning stays side-based, and settlement never runs.

mod support;

use backend::domain::{Side, Stage, ARGUED_STAGES};
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::repos::{cases, rankings, verdicts};
use backend::services::case_context::CaseContext;
use backend::services::case_flow::{CaseFlowService, FollowUp};

use crate::support::{build_test_state, seed_automated_case, submit_text};

#[tokio::test]
async fn test_automated_case_progresses_via_opponent_replies() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, human) = seed_automated_case(&state).await?;
    let flow = CaseFlowService::new();

    for stage in ARGUED_STAGES {
        let human_outcome = submit_text(&state, case_id, human, stage, "the human argues").await?;
        assert_eq!(human_outcome.advanced_to, None);
        assert_eq!(
            human_outcome.follow_up,
            Some(FollowUp::OpponentReply),
            "the automated side owes every stage after the human submits"
        );

        let reply = flow
            .drive_opponent(&state, case_id)
            .await?
            .expect("a reply is owed");
        assert_eq!(reply.side, Side::Defendant);
        assert_eq!(reply.stage, stage);
        assert_eq!(
            reply.advanced_to,
            Some(stage.next()),
            "the reply completes the stage pair"
        );
    }

    let case = cases::require_case(&state.db, case_id).await?;
    assert_eq!(case.current_stage, Stage::Verdict);

    let verdict = flow.adjudicate(&state, case_id).await?;
    assert!(verdicts::find_by_case(&state.db, case_id).await?.is_some());

    // Score settlement never runs for automated-opponent cases.
    assert!(!verdict.settlement_applied);
    assert!(rankings::find_by_user(&state.db, human).await?.is_none());
    assert!(rankings::top_by_score(&state.db, 10).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_opponent_can_open_a_stage_and_partitioning_stays_side_based() -> Result<(), AppError>
{
    let state = build_test_state().await?;
    let (case_id, human) = seed_automated_case(&state).await?;
    let flow = CaseFlowService::new();

    // Walk to cross-examination, where the responding side opens.
    for stage in [Stage::OpeningStatement, Stage::PlaintiffArgument] {
        submit_text(&state, case_id, human, stage, "the human argues").await?;
        flow.drive_opponent(&state, case_id).await?;
    }
    let case = cases::require_case(&state.db, case_id).await?;
    assert_eq!(case.current_stage, Stage::CrossExamination);

    // The automated side posts before the human this stage.
    let reply = flow
        .drive_opponent(&state, case_id)
        .await?
        .expect("the automated side owes the stage");
    assert_eq!(reply.stage, Stage::CrossExamination);
    assert_eq!(reply.advanced_to, None);

    let human_outcome =
        submit_text(&state, case_id, human, Stage::CrossExamination, "human response").await?;
    assert_eq!(human_outcome.advanced_to, Some(Stage::DefendantArgument));

    // Partitioning follows the recorded sides, not arrival order.
    let ctx = CaseContext::load(&state.db, case_id).await?;
    let bundle = ctx.bundle();
    let cross = &bundle[Stage::CrossExamination.index()];
    assert_eq!(cross.plaintiff, vec!["human response".to_string()]);
    assert_eq!(cross.defendant.len(), 1);
    assert!(cross.defendant[0].contains("DEFENDANT"));

    Ok(())
}

#[tokio::test]
async fn test_drive_opponent_is_a_no_op_when_nothing_is_owed() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, human) = seed_automated_case(&state).await?;
    let flow = CaseFlowService::new();

    submit_text(&state, case_id, human, Stage::OpeningStatement, "human opens").await?;
    assert!(flow.drive_opponent(&state, case_id).await?.is_some());

    // Stage advanced; nothing owed until the human moves again... but the
    // automated side owes the fresh stage only once it exists. Driving again
    // generates for the new stage, so drive twice and verify the duplicate
    // guard instead.
    let second = flow.drive_opponent(&state, case_id).await?;
    assert!(second.is_some(), "opponent may open the next stage");
    let third = flow.drive_opponent(&state, case_id).await?;
    assert!(third.is_none(), "already submitted; nothing owed");

    Ok(())
}

#[tokio::test]
async fn test_generator_failure_leaves_case_untouched() -> Result<(), AppError> {
    let state = support::build_test_state_with(backend::ai::AiHandles {
        generator: std::sync::Arc::new(support::FailingGenerator),
        adjudicator: std::sync::Arc::new(backend::ai::ScriptedAdjudicator::favoring(
            Side::Plaintiff,
        )),
        transcriber: std::sync::Arc::new(backend::ai::ScriptedTranscriber::new()),
    })
    .await?;
    let (case_id, human) = seed_automated_case(&state).await?;
    let flow = CaseFlowService::new();

    submit_text(&state, case_id, human, Stage::OpeningStatement, "human opens").await?;

    let err = flow
        .drive_opponent(&state, case_id)
        .await
        .expect_err("generation must surface the upstream failure");
    assert_eq!(err.code(), ErrorCode::UpstreamFailure);

    // The case remains in its last consistent stage; retrying is safe.
    let case = cases::require_case(&state.db, case_id).await?;
    assert_eq!(case.current_stage, Stage::OpeningStatement);

    Ok(())
}
