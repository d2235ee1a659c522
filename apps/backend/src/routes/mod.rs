//! HTTP route configuration.

pub mod cases;
pub mod leaderboard;
pub mod scenarios;

use actix_web::web;

use crate::health;

pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    cases::configure_routes(cfg);
    scenarios::configure_routes(cfg);
    leaderboard::configure_routes(cfg);
}
