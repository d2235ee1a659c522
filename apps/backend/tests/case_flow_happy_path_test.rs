//! End-to-end human-vs-human flow: ten submissions walk the five stages,
//! adjudication produces one verdict, settlement applies the award policy.

mod support;

use backend::domain::{Side, Stage, ARGUED_STAGES};
use backend::error::AppError;
use backend::repos::{case_results, cases, rankings, verdicts};
use backend::services::case_flow::{CaseFlowService, FollowUp};

use crate::support::{build_test_state, seed_human_case, submit_text};

#[tokio::test]
async fn test_full_case_reaches_verdict_and_settles() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, plaintiff, defendant) = seed_human_case(&state).await?;

    let mut last_follow_up = None;
    for stage in ARGUED_STAGES {
        let first = submit_text(&state, case_id, plaintiff, stage, "plaintiff argues").await?;
        assert_eq!(first.advanced_to, None, "one side is not enough to advance");

        let second = submit_text(&state, case_id, defendant, stage, "defendant argues").await?;
        assert_eq!(
            second.advanced_to,
            Some(stage.next()),
            "both sides in must advance exactly to the next stage"
        );
        last_follow_up = second.follow_up;
    }

    // The tenth submission entered the terminal stage and owes adjudication.
    assert_eq!(last_follow_up, Some(FollowUp::Adjudicate));
    let case = cases::require_case(&state.db, case_id).await?;
    assert_eq!(case.current_stage, Stage::Verdict);

    let verdict = CaseFlowService::new().adjudicate(&state, case_id).await?;
    assert_eq!(verdict.winner, Some(Side::Plaintiff));

    // Exactly one verdict and one denormalized result row.
    let stored = verdicts::require_by_case(&state.db, case_id).await?;
    assert_eq!(stored.id, verdict.id);
    assert!(stored.settlement_applied);

    let result = case_results::find_by_case(&state.db, case_id)
        .await?
        .expect("case result row must exist");
    assert_eq!(result.plaintiff_user_id, Some(plaintiff));
    assert_eq!(result.defendant_user_id, Some(defendant));
    assert_eq!(result.winner, Some(Side::Plaintiff));
    assert!(result.plaintiff_score > result.defendant_score);

    // Winner +10/+1 win, loser +3/+1 loss.
    let winner_entry = rankings::find_by_user(&state.db, plaintiff)
        .await?
        .expect("winner ranking entry");
    assert_eq!(winner_entry.score, 10);
    assert_eq!(winner_entry.wins, 1);
    assert_eq!(winner_entry.losses, 0);

    let loser_entry = rankings::find_by_user(&state.db, defendant)
        .await?
        .expect("loser ranking entry");
    assert_eq!(loser_entry.score, 3);
    assert_eq!(loser_entry.wins, 0);
    assert_eq!(loser_entry.losses, 1);

    let completed = cases::require_case(&state.db, case_id).await?;
    assert!(completed.is_completed());

    Ok(())
}

#[tokio::test]
async fn test_draw_awards_five_each_without_counts() -> Result<(), AppError> {
    let state = support::build_test_state_with(support::handles_with_verdict(None)).await?;
    let (case_id, plaintiff, defendant) = seed_human_case(&state).await?;

    for stage in ARGUED_STAGES {
        submit_text(&state, case_id, plaintiff, stage, "p").await?;
        submit_text(&state, case_id, defendant, stage, "d").await?;
    }

    let verdict = CaseFlowService::new().adjudicate(&state, case_id).await?;
    assert_eq!(verdict.winner, None);

    for user in [plaintiff, defendant] {
        let entry = rankings::find_by_user(&state.db, user)
            .await?
            .expect("ranking entry");
        assert_eq!(entry.score, 5);
        assert_eq!(entry.wins, 0);
        assert_eq!(entry.losses, 0);
    }

    Ok(())
}

#[tokio::test]
async fn test_audio_submission_goes_through_the_transcriber() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (case_id, plaintiff, _) = seed_human_case(&state).await?;

    let outcome = CaseFlowService::new()
        .submit_and_progress(
            &state,
            backend::services::case_flow::SubmitArgument {
                case_id,
                submitter: backend::domain::Submitter::Human(plaintiff),
                stage: Stage::OpeningStatement,
                transcript: None,
                audio_url: Some("audio/opening.webm".to_string()),
            },
        )
        .await?;

    assert_eq!(
        outcome.transcript,
        "Transcribed argument from audio/opening.webm."
    );
    Ok(())
}
