//! Shared helpers for integration tests: in-memory SQLite state with
//! scripted collaborators, plus data factories.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use backend::ai::{
    Adjudicator, AiError, AiHandles, ArgumentGenerator, CaseBrief, ScriptedAdjudicator,
    ScriptedGenerator, ScriptedTranscriber,
};
use backend::domain::transcript::StageBundle;
use backend::domain::verdict::AdjudicationOutcome;
use backend::domain::{Side, Stage, Submitter};
use backend::entities::cases::{CaseCategory, OpponentKind};
use backend::error::AppError;
use backend::infra::state::build_state;
use backend::repos::users;
use backend::services::case_flow::{CaseFlowService, SubmissionOutcome, SubmitArgument};
use backend::services::cases::{CaseService, CreateCase};
use backend::state::app_state::AppState;

/// Fresh in-memory database with the default scripted collaborators
/// (adjudicator favors the plaintiff).
pub async fn build_test_state() -> Result<AppState, AppError> {
    backend_test_support::logging::init();
    build_state().with_sqlite_memory().build().await
}

/// Fresh in-memory database with explicit collaborator handles.
pub async fn build_test_state_with(ai: AiHandles) -> Result<AppState, AppError> {
    backend_test_support::logging::init();
    build_state().with_sqlite_memory().with_ai(ai).build().await
}

/// Handles with a scripted adjudicator declaring the given outcome.
pub fn handles_with_verdict(winner: Option<Side>) -> AiHandles {
    AiHandles {
        generator: Arc::new(ScriptedGenerator::new()),
        adjudicator: Arc::new(match winner {
            Some(side) => ScriptedAdjudicator::favoring(side),
            None => ScriptedAdjudicator::draw(),
        }),
        transcriber: Arc::new(ScriptedTranscriber::new()),
    }
}

/// An adjudicator that always fails upstream, for failure-path tests.
pub struct FailingAdjudicator;

#[async_trait]
impl Adjudicator for FailingAdjudicator {
    async fn adjudicate(
        &self,
        _brief: &CaseBrief,
        _bundle: &[StageBundle; 5],
    ) -> Result<AdjudicationOutcome, AiError> {
        Err(AiError::Upstream {
            status: Some(503),
            message: "scripted outage".to_string(),
        })
    }
}

/// A generator that always fails upstream.
pub struct FailingGenerator;

#[async_trait]
impl ArgumentGenerator for FailingGenerator {
    async fn generate_argument(
        &self,
        _brief: &CaseBrief,
        _ctx: &backend::domain::transcript::ArgumentContext,
        _stage: Stage,
        _side: Side,
    ) -> Result<String, AiError> {
        Err(AiError::Upstream {
            status: Some(503),
            message: "scripted outage".to_string(),
        })
    }
}

/// Handles whose adjudicator always fails upstream.
pub fn handles_with_failing_adjudicator() -> AiHandles {
    AiHandles {
        generator: Arc::new(ScriptedGenerator::new()),
        adjudicator: Arc::new(FailingAdjudicator),
        transcriber: Arc::new(ScriptedTranscriber::new()),
    }
}

// ----- factories -----

pub async fn seed_user(state: &AppState, sub: &str, username: &str) -> Result<i64, AppError> {
    let user = users::create_user(&state.db, sub.to_string(), username.to_string(), false).await?;
    Ok(user.id)
}

pub async fn seed_ai_flagged_user(
    state: &AppState,
    sub: &str,
    username: &str,
) -> Result<i64, AppError> {
    let user = users::create_user(&state.db, sub.to_string(), username.to_string(), true).await?;
    Ok(user.id)
}

/// Human-vs-human case: creator argues plaintiff, a second user joins as
/// defendant. Returns (case_id, plaintiff_user, defendant_user).
pub async fn seed_human_case(state: &AppState) -> Result<(i64, i64, i64), AppError> {
    let plaintiff = seed_user(state, "sub-plaintiff", "ama").await?;
    let defendant = seed_user(state, "sub-defendant", "kofi").await?;

    let service = CaseService::new();
    let case = service
        .create_case(
            &state.db,
            CreateCase {
                user_id: plaintiff,
                title: "Doe v. Roe".to_string(),
                summary: "A dispute over a broken fence.".to_string(),
                category: CaseCategory::Civil,
                opponent: OpponentKind::Human,
                side: Some(Side::Plaintiff),
            },
        )
        .await?;
    service
        .join_case(&state.db, case.id, defendant, Side::Defendant)
        .await?;

    Ok((case.id, plaintiff, defendant))
}

/// Automated-opponent case: the creator argues plaintiff, the opponent holds
/// the defendant side. Returns (case_id, human_user).
pub async fn seed_automated_case(state: &AppState) -> Result<(i64, i64), AppError> {
    let human = seed_user(state, "sub-solo", "esi").await?;

    let case = CaseService::new()
        .create_case(
            &state.db,
            CreateCase {
                user_id: human,
                title: "State v. Mensah".to_string(),
                summary: "An alleged market stall burglary.".to_string(),
                category: CaseCategory::Criminal,
                opponent: OpponentKind::Automated,
                side: None,
            },
        )
        .await?;

    Ok((case.id, human))
}

/// Submit a transcript as a human participant.
pub async fn submit_text(
    state: &AppState,
    case_id: i64,
    user_id: i64,
    stage: Stage,
    text: &str,
) -> Result<SubmissionOutcome, AppError> {
    CaseFlowService::new()
        .submit_and_progress(
            state,
            SubmitArgument {
                case_id,
                submitter: Submitter::Human(user_id),
                stage,
                transcript: Some(text.to_string()),
                audio_url: None,
            },
        )
        .await
}
