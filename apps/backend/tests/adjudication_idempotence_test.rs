//! Idempotence laws: at most one verdict per case, at most one settlement
//! per verdict, and safe retries after upstream failure.

mod support;

use backend::domain::{Side, Stage, ARGUED_STAGES};
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::infra::state::build_state;
use backend::repos::{cases, rankings, verdicts};
use backend::services::case_flow::CaseFlowService;

use crate::support::{
    build_test_state, handles_with_failing_adjudicator, handles_with_verdict, seed_human_case,
    submit_text,
};

async fn run_all_stages(
    state: &backend::state::app_state::AppState,
    case_id: i64,
    plaintiff: i64,
    defendant: i64,
) -> Result<(), AppError> {
    for stage in ARGUED_STAGES {
        submit_text(state, case_id, plaintiff, stage, "p").await?;
        submit_text(state, case_id, defendant, stage, "d").await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_double_adjudication_yields_one_verdict_and_one_settlement() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, plaintiff, defendant) = seed_human_case(&state).await?;
    run_all_stages(&state, case_id, plaintiff, defendant).await?;

    let flow = CaseFlowService::new();
    let first = flow.adjudicate(&state, case_id).await?;
    let second = flow.adjudicate(&state, case_id).await?;

    // Same row both times.
    assert_eq!(first.id, second.id);

    // Settlement did not double-count.
    let winner_entry = rankings::find_by_user(&state.db, plaintiff)
        .await?
        .expect("winner entry");
    assert_eq!(winner_entry.score, 10);
    assert_eq!(winner_entry.wins, 1);

    // The claim flag cannot be taken twice.
    assert!(!verdicts::try_mark_settlement_applied(&state.db, first.id).await?);

    Ok(())
}

#[tokio::test]
async fn test_adjudication_before_terminal_stage_is_not_ready() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, plaintiff, _) = seed_human_case(&state).await?;
    submit_text(&state, case_id, plaintiff, Stage::OpeningStatement, "p").await?;

    let err = CaseFlowService::new()
        .adjudicate(&state, case_id)
        .await
        .expect_err("non-terminal case cannot be adjudicated");
    assert_eq!(err.code(), ErrorCode::VerdictNotReady);
    assert!(verdicts::find_by_case(&state.db, case_id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_half_joined_case_is_not_ready_and_writes_nothing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let plaintiff = support::seed_user(&state, "sub-lonely", "afia").await?;

    let case = backend::services::cases::CaseService::new()
        .create_case(
            &state.db,
            backend::services::cases::CreateCase {
                user_id: plaintiff,
                title: "Half-joined".to_string(),
                summary: "Only one side ever joined.".to_string(),
                category: backend::entities::cases::CaseCategory::Civil,
                opponent: backend::entities::cases::OpponentKind::Human,
                side: Some(Side::Plaintiff),
            },
        )
        .await?;

    // Drive the stage pointer to the terminal state directly; submissions
    // cannot get there without a second participant.
    let mut current = cases::require_case(&state.db, case.id).await?;
    while !current.current_stage.is_terminal() {
        current = cases::try_advance_stage(
            &state.db,
            case.id,
            current.current_stage,
            current.current_stage.next(),
            current.lock_version,
        )
        .await?
        .expect("uncontended advance");
    }

    let err = CaseFlowService::new()
        .adjudicate(&state, case.id)
        .await
        .expect_err("adjudication requires both sides bound");
    assert_eq!(err.code(), ErrorCode::VerdictNotReady);
    assert!(verdicts::find_by_case(&state.db, case.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_flagged_non_human_identity_is_excluded_from_settlement() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let plaintiff = support::seed_user(&state, "sub-human", "ama").await?;
    // Bound as a participant, but flagged non-human in the identity store.
    let flagged = support::seed_ai_flagged_user(&state, "sub-flagged", "bot").await?;

    let service = backend::services::cases::CaseService::new();
    let case = service
        .create_case(
            &state.db,
            backend::services::cases::CreateCase {
                user_id: plaintiff,
                title: "Flagged opponent".to_string(),
                summary: "One participant is flagged non-human.".to_string(),
                category: backend::entities::cases::CaseCategory::Civil,
                opponent: backend::entities::cases::OpponentKind::Human,
                side: Some(Side::Plaintiff),
            },
        )
        .await?;
    service
        .join_case(&state.db, case.id, flagged, Side::Defendant)
        .await?;

    run_all_stages(&state, case.id, plaintiff, flagged).await?;
    CaseFlowService::new().adjudicate(&state, case.id).await?;

    // The human winner is settled; the flagged identity never reaches the
    // ledger even though it was bound as a participant.
    assert!(rankings::find_by_user(&state.db, plaintiff).await?.is_some());
    assert!(rankings::find_by_user(&state.db, flagged).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_adjudicator_failure_commits_nothing_and_retry_succeeds() -> Result<(), AppError> {
    let state = support::build_test_state_with(handles_with_failing_adjudicator()).await?;
    let (case_id, plaintiff, defendant) = seed_human_case(&state).await?;
    run_all_stages(&state, case_id, plaintiff, defendant).await?;

    let err = CaseFlowService::new()
        .adjudicate(&state, case_id)
        .await
        .expect_err("the outage must surface");
    assert_eq!(err.code(), ErrorCode::UpstreamFailure);

    // No partial state: no verdict, case still terminal and active.
    assert!(verdicts::find_by_case(&state.db, case_id).await?.is_none());
    let case = cases::require_case(&state.db, case_id).await?;
    assert_eq!(case.current_stage, Stage::Verdict);
    assert!(!case.is_completed());

    // Same database, healthy adjudicator: the retrigger completes the case.
    let healthy = build_state()
        .with_db_conn(state.db.clone())
        .with_ai(handles_with_verdict(Some(Side::Defendant)))
        .build()
        .await?;
    let verdict = CaseFlowService::new().adjudicate(&healthy, case_id).await?;
    assert_eq!(verdict.winner, Some(Side::Defendant));
    assert!(verdict.settlement_applied);

    let defendant_entry = rankings::find_by_user(&healthy.db, defendant)
        .await?
        .expect("winner entry");
    assert_eq!(defendant_entry.score, 10);

    Ok(())
}
