//! Scenario repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::scenarios_sea as scenarios_adapter;
use crate::entities::cases::CaseCategory;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use crate::entities::scenarios::Model as Scenario;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    scenario_id: i64,
) -> Result<Option<Scenario>, DomainError> {
    Ok(scenarios_adapter::find_by_id(conn, scenario_id).await?)
}

pub async fn require_scenario<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    scenario_id: i64,
) -> Result<Scenario, DomainError> {
    find_by_id(conn, scenario_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Scenario,
            format!("Scenario {scenario_id} not found"),
        )
    })
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Scenario>, DomainError> {
    Ok(scenarios_adapter::list_all(conn).await?)
}

pub async fn create_scenario<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    title: String,
    facts: String,
    category: CaseCategory,
) -> Result<Scenario, DomainError> {
    Ok(scenarios_adapter::create_scenario(conn, title, facts, category).await?)
}
