//! Read-side behavior: case views, turn indication, join codes, leaderboard,
//! identity provisioning.

mod support;

use backend::domain::{Side, Stage};
use backend::error::AppError;
use backend::services::cases::CaseService;
use backend::services::rankings::leaderboard;
use backend::services::users::ensure_user;

use crate::support::{build_test_state, seed_human_case, submit_text};

#[tokio::test]
async fn test_case_view_tracks_completeness_and_turn() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, plaintiff, defendant) = seed_human_case(&state).await?;
    let service = CaseService::new();

    let view = service.case_view(&state.db, case_id).await?;
    assert_eq!(view.current_stage, Stage::OpeningStatement);
    assert_eq!(view.participants.len(), 2);
    assert!(!view.plaintiff_submitted);
    assert!(!view.defendant_submitted);
    assert_eq!(view.turn, Some(Side::Plaintiff), "plaintiff opens");

    submit_text(&state, case_id, plaintiff, Stage::OpeningStatement, "p").await?;
    let view = service.case_view(&state.db, case_id).await?;
    assert!(view.plaintiff_submitted);
    assert_eq!(view.turn, Some(Side::Defendant));

    submit_text(&state, case_id, defendant, Stage::OpeningStatement, "d").await?;
    let view = service.case_view(&state.db, case_id).await?;
    // Fresh stage, fresh completeness.
    assert_eq!(view.current_stage, Stage::PlaintiffArgument);
    assert!(!view.plaintiff_submitted);
    assert!(!view.defendant_submitted);

    Ok(())
}

#[tokio::test]
async fn test_join_code_resolves_the_case() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, _, _) = seed_human_case(&state).await?;
    let service = CaseService::new();

    let view = service.case_view(&state.db, case_id).await?;
    let code = view.join_code.expect("human cases carry a join code");

    let found = service.find_by_join_code(&state.db, &code).await?;
    assert_eq!(found.id, case_id);

    let missing = service.find_by_join_code(&state.db, "0000000000").await;
    assert!(missing.is_err());

    Ok(())
}

#[tokio::test]
async fn test_leaderboard_orders_by_score_with_names() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, plaintiff, defendant) = seed_human_case(&state).await?;

    for stage in backend::domain::ARGUED_STAGES {
        submit_text(&state, case_id, plaintiff, stage, "p").await?;
        submit_text(&state, case_id, defendant, stage, "d").await?;
    }
    backend::services::case_flow::CaseFlowService::new()
        .adjudicate(&state, case_id)
        .await?;

    let rows = leaderboard(&state.db, 10).await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].user_id, plaintiff);
    assert_eq!(rows[0].score, 10);
    assert_eq!(rows[0].username, "ama");
    assert_eq!(rows[1].user_id, defendant);
    assert_eq!(rows[1].score, 3);

    Ok(())
}

#[tokio::test]
async fn test_case_created_from_scenario_inherits_its_facts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let creator = support::seed_user(&state, "sub-scenario", "adjoa").await?;

    let scenario = backend::repos::scenarios::create_scenario(
        &state.db,
        "The Disputed Goat".to_string(),
        "Two neighbours claim the same goat.".to_string(),
        backend::entities::cases::CaseCategory::Civil,
    )
    .await?;

    let case = CaseService::new()
        .create_case_from_scenario(
            &state.db,
            scenario.id,
            creator,
            backend::entities::cases::OpponentKind::Automated,
            None,
        )
        .await?;

    assert_eq!(case.title, "The Disputed Goat");
    assert_eq!(case.summary, "Two neighbours claim the same goat.");
    assert!(case.is_automated());
    assert_eq!(case.automated_side, Some(Side::Defendant));
    // Automated cases carry no join code; there is nobody to share with.
    assert!(case.join_code.is_none());

    let missing = CaseService::new()
        .create_case_from_scenario(
            &state.db,
            scenario.id + 100,
            creator,
            backend::entities::cases::OpponentKind::Automated,
            None,
        )
        .await;
    assert_eq!(
        missing.expect_err("unknown scenario").code(),
        backend::errors::ErrorCode::ScenarioNotFound
    );

    Ok(())
}

#[tokio::test]
async fn test_ensure_user_is_idempotent() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let first = ensure_user(&state.db, "sub-abc", "ama").await?;
    let second = ensure_user(&state.db, "sub-abc", "ama").await?;
    assert_eq!(first.id, second.id);

    let other = ensure_user(&state.db, "sub-def", "kofi").await?;
    assert_ne!(first.id, other.id);

    Ok(())
}
