//! SeaORM adapter for the competitive rankings ledger.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::rankings;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<rankings::Model>, sea_orm::DbErr> {
    rankings::Entity::find()
        .filter(rankings::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn top_by_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<rankings::Model>, sea_orm::DbErr> {
    rankings::Entity::find()
        .order_by_desc(rankings::Column::Score)
        .order_by_desc(rankings::Column::Wins)
        .order_by_asc(rankings::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

/// Additively apply a settlement delta for one identity.
///
/// The update is a column expression (`score = score + delta`), so concurrent
/// applications cannot lose increments. When no row exists yet one is
/// inserted with the delta as the initial score, floor-clamped at zero; if
/// that insert loses a unique race the additive update is retried once.
pub async fn apply_delta<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    score_delta: i32,
    wins_delta: i32,
    losses_delta: i32,
) -> Result<(), sea_orm::DbErr> {
    if additive_update(conn, user_id, score_delta, wins_delta, losses_delta).await? {
        return Ok(());
    }

    let now = time::OffsetDateTime::now_utc();
    let ranking_active = rankings::ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        score: Set(score_delta.max(0)),
        wins: Set(wins_delta),
        losses: Set(losses_delta),
        created_at: Set(now),
        updated_at: Set(now),
    };

    match ranking_active.insert(conn).await {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => {
            // Lost the insert race; the row exists now, so the additive
            // update must succeed.
            additive_update(conn, user_id, score_delta, wins_delta, losses_delta).await?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn additive_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    score_delta: i32,
    wins_delta: i32,
    losses_delta: i32,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = rankings::Entity::update_many()
        .col_expr(
            rankings::Column::Score,
            Expr::col(rankings::Column::Score).add(score_delta),
        )
        .col_expr(
            rankings::Column::Wins,
            Expr::col(rankings::Column::Wins).add(wins_delta),
        )
        .col_expr(
            rankings::Column::Losses,
            Expr::col(rankings::Column::Losses).add(losses_delta),
        )
        .col_expr(rankings::Column::UpdatedAt, Expr::val(now).into())
        .filter(rankings::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}
