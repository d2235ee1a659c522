//! User service: idempotent identity provisioning.

use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::users::{self, User};

/// Ensure a user exists for an external subject, creating one if necessary.
///
/// Idempotent: repeated calls with the same sub return the same user. A
/// concurrent create racing on the unique sub index falls back to the
/// existing row.
pub async fn ensure_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
    username: &str,
) -> Result<User, AppError> {
    if let Some(user) = users::find_by_sub(conn, sub).await? {
        debug!(user_id = user.id, "repeat login for existing user");
        return Ok(user);
    }

    match users::create_user(conn, sub.to_string(), username.to_string(), false).await {
        Ok(user) => Ok(user),
        Err(DomainError::Conflict(ConflictKind::Other(_), _)) => {
            // Lost a unique race on sub; the row exists now.
            let user = users::find_by_sub(conn, sub)
                .await?
                .ok_or_else(|| AppError::internal("user vanished after unique conflict"))?;
            Ok(user)
        }
        Err(e) => Err(e.into()),
    }
}
