//! Leaderboard route.

use actix_web::{web, Result};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::services::rankings::{leaderboard, LeaderboardRow};
use crate::state::app_state::AppState;

const DEFAULT_LIMIT: u64 = 50;
const MAX_LIMIT: u64 = 200;

#[derive(Deserialize)]
struct LeaderboardQuery {
    limit: Option<u64>,
}

/// GET /api/leaderboard
async fn get_leaderboard(
    query: web::Query<LeaderboardQuery>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<LeaderboardRow>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    let rows = with_txn(&app_state, |txn| {
        Box::pin(async move { leaderboard(txn, limit).await })
    })
    .await?;

    Ok(web::Json(rows))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/leaderboard").route(web::get().to(get_leaderboard)));
}
