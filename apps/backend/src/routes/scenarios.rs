//! Scenario catalogue routes.

use actix_web::{web, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::Side;
use crate::entities::cases::{CaseCategory, OpponentKind};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::scenarios;
use crate::services::cases::CaseService;
use crate::state::app_state::AppState;

#[derive(Serialize)]
struct ScenarioView {
    id: i64,
    title: String,
    facts: String,
    category: CaseCategory,
}

/// GET /api/scenarios
async fn list_scenarios(
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<ScenarioView>>, AppError> {
    let rows = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(scenarios::list_all(txn).await?) })
    })
    .await?;

    Ok(web::Json(
        rows.into_iter()
            .map(|s| ScenarioView {
                id: s.id,
                title: s.title,
                facts: s.facts,
                category: s.category,
            })
            .collect(),
    ))
}

#[derive(Deserialize)]
struct CreateFromScenarioRequest {
    user_id: i64,
    opponent: OpponentKind,
    side: Option<Side>,
}

#[derive(Serialize)]
struct CaseCreatedResponse {
    id: i64,
    join_code: Option<String>,
}

/// POST /api/scenarios/{scenario_id}/cases
async fn create_case_from_scenario(
    path: web::Path<i64>,
    body: web::Json<CreateFromScenarioRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<CaseCreatedResponse>, AppError> {
    let scenario_id = path.into_inner();
    if scenario_id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidScenarioId,
            "scenario_id must be a positive integer",
        ));
    }
    let req = body.into_inner();

    let case = with_txn(&app_state, |txn| {
        Box::pin(async move {
            CaseService::new()
                .create_case_from_scenario(txn, scenario_id, req.user_id, req.opponent, req.side)
                .await
        })
    })
    .await?;

    Ok(web::Json(CaseCreatedResponse {
        id: case.id,
        join_code: case.join_code,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/scenarios").route(web::get().to(list_scenarios)));
    cfg.service(
        web::resource("/api/scenarios/{scenario_id}/cases")
            .route(web::post().to(create_case_from_scenario)),
    );
}
