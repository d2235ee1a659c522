//! Case-related HTTP routes. Thin wrappers: validation and state mutation
//! live in the services.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::verdict::AdjudicationOutcome;
use crate::domain::{Side, Stage, Submitter};
use crate::entities::cases::{CaseCategory, OpponentKind};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::case_id::CaseId;
use crate::repos::verdicts;
use crate::services::case_flow::{CaseFlowService, SubmitArgument};
use crate::services::cases::{CaseService, CaseView, CreateCase};
use crate::state::app_state::AppState;

#[derive(Deserialize)]
struct CreateCaseRequest {
    user_id: i64,
    title: String,
    summary: String,
    category: CaseCategory,
    opponent: OpponentKind,
    side: Option<Side>,
}

#[derive(Serialize)]
struct CaseCreatedResponse {
    id: i64,
    join_code: Option<String>,
}

/// POST /api/cases
async fn create_case(
    body: web::Json<CreateCaseRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<CaseCreatedResponse>, AppError> {
    let req = body.into_inner();

    let case = with_txn(&app_state, |txn| {
        Box::pin(async move {
            CaseService::new()
                .create_case(
                    txn,
                    CreateCase {
                        user_id: req.user_id,
                        title: req.title,
                        summary: req.summary,
                        category: req.category,
                        opponent: req.opponent,
                        side: req.side,
                    },
                )
                .await
        })
    })
    .await?;

    Ok(web::Json(CaseCreatedResponse {
        id: case.id,
        join_code: case.join_code,
    }))
}

#[derive(Deserialize)]
struct JoinCaseRequest {
    user_id: i64,
    side: Side,
}

/// POST /api/cases/{case_id}/join
async fn join_case(
    case_id: CaseId,
    body: web::Json<JoinCaseRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let id = case_id.0;

    with_txn(&app_state, |txn| {
        Box::pin(async move {
            CaseService::new()
                .join_case(txn, id, req.user_id, req.side)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/cases/{case_id}
async fn get_case(
    case_id: CaseId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<CaseView>, AppError> {
    let id = case_id.0;

    let view = with_txn(&app_state, |txn| {
        Box::pin(async move { CaseService::new().case_view(txn, id).await })
    })
    .await?;

    Ok(web::Json(view))
}

/// GET /api/cases/code/{join_code}
async fn get_case_by_code(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<CaseView>, AppError> {
    let code = path.into_inner();

    let view = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let service = CaseService::new();
            let case = service.find_by_join_code(txn, &code).await?;
            service.case_view(txn, case.id).await
        })
    })
    .await?;

    Ok(web::Json(view))
}

#[derive(Deserialize)]
struct SubmitRequest {
    user_id: i64,
    stage: Stage,
    transcript: Option<String>,
    audio_url: Option<String>,
}

#[derive(Serialize)]
struct SubmitResponse {
    submission_id: i64,
    stage: Stage,
    side: Side,
    transcript: String,
    advanced_to: Option<Stage>,
}

/// POST /api/cases/{case_id}/submissions
///
/// Records the submission and kicks off any owed background work (opponent
/// reply, adjudication) without blocking the response on it.
async fn submit_argument(
    case_id: CaseId,
    body: web::Json<SubmitRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SubmitResponse>, AppError> {
    let req = body.into_inner();

    let outcome = CaseFlowService::new()
        .handle_submission(
            &app_state,
            SubmitArgument {
                case_id: case_id.0,
                submitter: Submitter::Human(req.user_id),
                stage: req.stage,
                transcript: req.transcript,
                audio_url: req.audio_url,
            },
        )
        .await?;

    Ok(web::Json(SubmitResponse {
        submission_id: outcome.submission_id,
        stage: outcome.stage,
        side: outcome.side,
        transcript: outcome.transcript,
        advanced_to: outcome.advanced_to,
    }))
}

#[derive(Serialize)]
struct VerdictResponse {
    case_id: i64,
    winner: Option<Side>,
    settlement_applied: bool,
    outcome: AdjudicationOutcome,
}

/// GET /api/cases/{case_id}/verdict
async fn get_verdict(
    case_id: CaseId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<VerdictResponse>, AppError> {
    let id = case_id.0;

    let verdict = with_txn(&app_state, |txn| {
        Box::pin(async move {
            verdicts::find_by_case(txn, id).await?.ok_or_else(|| {
                AppError::not_found(
                    ErrorCode::VerdictNotFound,
                    "adjudication has not produced a verdict yet",
                )
            })
        })
    })
    .await?;

    Ok(web::Json(VerdictResponse {
        case_id: verdict.case_id,
        winner: verdict.winner,
        settlement_applied: verdict.settlement_applied,
        outcome: verdict.outcome,
    }))
}

/// POST /api/cases/{case_id}/verdict
///
/// Manual (re-)trigger of adjudication; safe to call repeatedly thanks to
/// the idempotent guard.
async fn trigger_verdict(
    case_id: CaseId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<VerdictResponse>, AppError> {
    let verdict = CaseFlowService::new()
        .adjudicate(&app_state, case_id.0)
        .await?;

    Ok(web::Json(VerdictResponse {
        case_id: verdict.case_id,
        winner: verdict.winner,
        settlement_applied: verdict.settlement_applied,
        outcome: verdict.outcome,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/cases").route(web::post().to(create_case)));
    cfg.service(web::resource("/api/cases/code/{join_code}").route(web::get().to(get_case_by_code)));
    cfg.service(web::resource("/api/cases/{case_id}").route(web::get().to(get_case)));
    cfg.service(web::resource("/api/cases/{case_id}/join").route(web::post().to(join_case)));
    cfg.service(
        web::resource("/api/cases/{case_id}/submissions").route(web::post().to(submit_argument)),
    );
    cfg.service(
        web::resource("/api/cases/{case_id}/verdict")
            .route(web::get().to(get_verdict))
            .route(web::post().to(trigger_verdict)),
    );
}
