//! Progression guarantees: one transition per stage under concurrent
//! submissions, clean compare-and-set losses, typed conflicts on duplicates.

mod support;

use backend::domain::{Stage, Submitter};
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::repos::cases;
use backend::services::case_flow::{CaseFlowService, SubmitArgument};

use crate::support::{build_test_state, seed_human_case, submit_text};

#[tokio::test]
async fn test_concurrent_submissions_advance_exactly_once() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, plaintiff, defendant) = seed_human_case(&state).await?;
    let flow = CaseFlowService::new();

    let plaintiff_req = SubmitArgument {
        case_id,
        submitter: Submitter::Human(plaintiff),
        stage: Stage::OpeningStatement,
        transcript: Some("plaintiff opens".to_string()),
        audio_url: None,
    };
    let defendant_req = SubmitArgument {
        case_id,
        submitter: Submitter::Human(defendant),
        stage: Stage::OpeningStatement,
        transcript: Some("defendant opens".to_string()),
        audio_url: None,
    };

    let (a, b) = tokio::join!(
        flow.submit_and_progress(&state, plaintiff_req),
        flow.submit_and_progress(&state, defendant_req),
    );
    let (a, b) = (a?, b?);

    // Exactly one of the two events performed the transition.
    let advances = [a.advanced_to, b.advanced_to]
        .iter()
        .filter(|adv| adv.is_some())
        .count();
    assert_eq!(advances, 1);

    let case = cases::require_case(&state.db, case_id).await?;
    assert_eq!(
        case.current_stage,
        Stage::PlaintiffArgument,
        "one pair of submissions advances one stage, never two"
    );

    Ok(())
}

#[tokio::test]
async fn test_stale_lock_version_loses_the_compare_and_set() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, _, _) = seed_human_case(&state).await?;

    let case = cases::require_case(&state.db, case_id).await?;

    // A writer holding a stale lock version must lose without touching state.
    let stale = cases::try_advance_stage(
        &state.db,
        case_id,
        case.current_stage,
        case.current_stage.next(),
        case.lock_version + 1,
    )
    .await?;
    assert!(stale.is_none());

    let unchanged = cases::require_case(&state.db, case_id).await?;
    assert_eq!(unchanged.current_stage, case.current_stage);
    assert_eq!(unchanged.lock_version, case.lock_version);

    // The stage pointer never moves backwards either: advancing "from" a
    // stage the case is not at is a clean loss.
    let wrong_from = cases::try_advance_stage(
        &state.db,
        case_id,
        Stage::ClosingSubmission,
        Stage::Verdict,
        unchanged.lock_version,
    )
    .await?;
    assert!(wrong_from.is_none());

    Ok(())
}

#[tokio::test]
async fn test_duplicate_submission_for_a_side_and_stage_conflicts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, plaintiff, _) = seed_human_case(&state).await?;

    submit_text(&state, case_id, plaintiff, Stage::OpeningStatement, "first").await?;

    let err = submit_text(&state, case_id, plaintiff, Stage::OpeningStatement, "second")
        .await
        .expect_err("one submission per (case, stage, side)");
    assert_eq!(err.code(), ErrorCode::DuplicateSubmission);

    Ok(())
}

#[tokio::test]
async fn test_submission_for_a_non_current_stage_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, plaintiff, _) = seed_human_case(&state).await?;

    let err = submit_text(&state, case_id, plaintiff, Stage::ClosingSubmission, "early")
        .await
        .expect_err("only the current stage accepts submissions");
    assert_eq!(err.code(), ErrorCode::StageMismatch);

    Ok(())
}

#[tokio::test]
async fn test_non_participants_cannot_submit() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, _, _) = seed_human_case(&state).await?;
    let outsider = support::seed_user(&state, "sub-outsider", "yaw").await?;

    let err = submit_text(&state, case_id, outsider, Stage::OpeningStatement, "hi")
        .await
        .expect_err("outsiders are rejected");
    assert_eq!(err.code(), ErrorCode::NotAParticipant);

    Ok(())
}

#[tokio::test]
async fn test_side_uniqueness_makes_joins_race_safe() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, _, _) = seed_human_case(&state).await?;
    let late = support::seed_user(&state, "sub-late", "akos").await?;

    let err = backend::services::cases::CaseService::new()
        .join_case(&state.db, case_id, late, backend::domain::Side::Defendant)
        .await
        .expect_err("side already taken");
    assert_eq!(err.code(), ErrorCode::SideTaken);

    Ok(())
}

#[tokio::test]
async fn test_terminal_case_accepts_no_submissions() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, plaintiff, defendant) = seed_human_case(&state).await?;

    for stage in backend::domain::ARGUED_STAGES {
        submit_text(&state, case_id, plaintiff, stage, "p").await?;
        submit_text(&state, case_id, defendant, stage, "d").await?;
    }

    let err = submit_text(&state, case_id, plaintiff, Stage::Verdict, "late")
        .await
        .expect_err("terminal stage accepts nothing");
    assert_eq!(err.code(), ErrorCode::CaseCompleted);

    Ok(())
}
