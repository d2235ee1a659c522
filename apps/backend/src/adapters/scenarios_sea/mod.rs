//! SeaORM adapter for scenarios.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};

use crate::entities::cases::CaseCategory;
use crate::entities::scenarios;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    scenario_id: i64,
) -> Result<Option<scenarios::Model>, sea_orm::DbErr> {
    scenarios::Entity::find_by_id(scenario_id).one(conn).await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<scenarios::Model>, sea_orm::DbErr> {
    scenarios::Entity::find()
        .order_by_asc(scenarios::Column::Id)
        .all(conn)
        .await
}

pub async fn create_scenario<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    title: String,
    facts: String,
    category: CaseCategory,
) -> Result<scenarios::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let scenario_active = scenarios::ActiveModel {
        id: NotSet,
        title: Set(title),
        facts: Set(facts),
        category: Set(category),
        created_at: Set(now),
    };

    scenario_active.insert(conn).await
}
