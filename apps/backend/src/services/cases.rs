//! Case lifecycle service: creation, joining, and read views.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::info;

use crate::adapters::cases_sea::CaseCreate;
use crate::domain::{whose_turn, Side, Stage};
use crate::entities::cases::{CaseCategory, CaseStatus, OpponentKind};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::cases::Case;
use crate::repos::submissions::stage_completeness;
use crate::repos::{cases, participants, scenarios, submissions, users};
use crate::utils::join_code::generate_join_code;

/// Case creation request, already validated at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct CreateCase {
    pub user_id: i64,
    pub title: String,
    pub summary: String,
    pub category: CaseCategory,
    pub opponent: OpponentKind,
    /// Which side the creator argues. Ignored for automated cases, where the
    /// creator is always the plaintiff and the opponent the defendant.
    pub side: Option<Side>,
}

#[derive(Default)]
pub struct CaseService;

impl CaseService {
    pub fn new() -> Self {
        Self
    }

    /// Create a case and bind its creator.
    pub async fn create_case<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        req: CreateCase,
    ) -> Result<Case, AppError> {
        users::require_user(conn, req.user_id).await?;

        let (creator_side, dto) = match req.opponent {
            OpponentKind::Automated => {
                // Automated cases: the creator argues the plaintiff side and
                // the opponent holds the defendant side without a binding.
                let dto = CaseCreate::new(req.title, req.summary, req.category, req.user_id)
                    .with_automated_opponent(Side::Defendant.into());
                (Side::Plaintiff, dto)
            }
            OpponentKind::Human => {
                let side = req.side.ok_or_else(|| {
                    AppError::validation(
                        ErrorCode::ValidationError,
                        "side is required when the opponent is human",
                    )
                })?;
                let dto = CaseCreate::new(req.title, req.summary, req.category, req.user_id)
                    .with_join_code(generate_join_code());
                (side, dto)
            }
        };

        let case = cases::create_case(conn, dto).await?;
        participants::create_participant(conn, case.id, req.user_id, creator_side).await?;

        info!(case_id = case.id, opponent = ?case.opponent_kind, "case created");
        Ok(case)
    }

    /// Create a case from a catalogued scenario.
    pub async fn create_case_from_scenario<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        scenario_id: i64,
        user_id: i64,
        opponent: OpponentKind,
        side: Option<Side>,
    ) -> Result<Case, AppError> {
        let scenario = scenarios::require_scenario(conn, scenario_id).await?;

        self.create_case(
            conn,
            CreateCase {
                user_id,
                title: scenario.title,
                summary: scenario.facts,
                category: scenario.category,
                opponent,
                side,
            },
        )
        .await
    }

    /// Bind a second identity to a case side.
    ///
    /// The (case, side) uniqueness constraint turns a lost race into a typed
    /// `SIDE_TAKEN` conflict, distinguishable from other failures.
    pub async fn join_case<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        case_id: i64,
        user_id: i64,
        side: Side,
    ) -> Result<(), AppError> {
        let case = cases::require_case(conn, case_id).await?;

        if case.is_completed() {
            return Err(AppError::conflict(
                ErrorCode::CaseCompleted,
                "case is already completed",
            ));
        }
        if case.is_automated() {
            return Err(AppError::conflict(
                ErrorCode::SideTaken,
                "the opposing side of this case is argued by the automated opponent",
            ));
        }

        users::require_user(conn, user_id).await?;
        participants::create_participant(conn, case_id, user_id, side).await?;

        info!(case_id, user_id, side = %side, "participant joined");
        Ok(())
    }

    /// Resolve a case by its share code.
    pub async fn find_by_join_code<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        join_code: &str,
    ) -> Result<Case, AppError> {
        cases::find_by_join_code(conn, join_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found(ErrorCode::CaseNotFound, "No case with this join code")
            })
    }

    /// Read view for a case: metadata, bindings, current-stage completeness
    /// and the turn indication.
    pub async fn case_view<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        case_id: i64,
    ) -> Result<CaseView, AppError> {
        let case = cases::require_case(conn, case_id).await?;
        let bindings = participants::find_all_by_case(conn, case_id).await?;

        let mut view_participants = Vec::with_capacity(bindings.len());
        for p in &bindings {
            let user = users::require_user(conn, p.user_id).await?;
            view_participants.push(ParticipantView {
                user_id: p.user_id,
                username: user.username,
                side: p.side,
            });
        }

        let (plaintiff_submitted, defendant_submitted) = if case.current_stage.is_terminal() {
            (false, false)
        } else {
            let stage_rows =
                submissions::find_by_case_and_stage(conn, case_id, case.current_stage).await?;
            stage_completeness(&stage_rows)
        };

        let turn = if case.current_stage.is_terminal() {
            None
        } else {
            whose_turn(case.current_stage, plaintiff_submitted, defendant_submitted)
        };

        Ok(CaseView {
            id: case.id,
            title: case.title,
            summary: case.summary,
            category: case.category,
            opponent_kind: case.opponent_kind,
            automated_side: case.automated_side,
            join_code: case.join_code,
            current_stage: case.current_stage,
            status: case.status,
            participants: view_participants,
            plaintiff_submitted,
            defendant_submitted,
            turn,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantView {
    pub user_id: i64,
    pub username: String,
    pub side: Side,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseView {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub category: CaseCategory,
    pub opponent_kind: OpponentKind,
    pub automated_side: Option<Side>,
    pub join_code: Option<String>,
    pub current_stage: Stage,
    pub status: CaseStatus,
    pub participants: Vec<ParticipantView>,
    pub plaintiff_submitted: bool,
    pub defendant_submitted: bool,
    pub turn: Option<Side>,
}
