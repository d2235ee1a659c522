//! SeaORM adapters: DbErr-level queries, generic over `ConnectionTrait`.
//! Repos lift results into `DomainError`.

pub mod case_results_sea;
pub mod cases_sea;
pub mod participants_sea;
pub mod rankings_sea;
pub mod scenarios_sea;
pub mod submissions_sea;
pub mod users_sea;
pub mod verdicts_sea;
