//! User repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use crate::entities::users::Model as User;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    Ok(users_adapter::find_by_id(conn, user_id).await?)
}

pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    find_by_id(conn, user_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
    })
}

pub async fn find_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<User>, DomainError> {
    Ok(users_adapter::find_by_sub(conn, sub).await?)
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: String,
    username: String,
    is_ai: bool,
) -> Result<User, DomainError> {
    Ok(users_adapter::create_user(conn, sub, username, is_ai).await?)
}
