//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos lift into
//! `crate::errors::domain::DomainError` through `From<DbErr>`, which lands
//! here. Constraint violations are recognized by the names this schema
//! declares (Postgres) and by the table.column phrasing (SQLite) so the same
//! mapping serves both backends.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map a unique-violation message to the engine's typed conflicts by looking
/// for the constraint name (Postgres) or the table.column list (SQLite).
fn map_unique_violation(error_msg: &str) -> (ConflictKind, &'static str) {
    if error_msg.contains("ux_case_participants_case_side")
        || error_msg.contains("case_participants.side")
    {
        return (ConflictKind::SideTaken, "Side already taken for this case");
    }
    if error_msg.contains("ux_case_participants_case_user")
        || error_msg.contains("case_participants.user_id")
    {
        return (
            ConflictKind::AlreadyJoined,
            "Identity already joined this case",
        );
    }
    if error_msg.contains("ux_submissions_case_stage_side") || error_msg.contains("submissions.")
    {
        return (
            ConflictKind::DuplicateSubmission,
            "A submission for this stage and side already exists",
        );
    }
    if error_msg.contains("ux_verdicts_case_id") || error_msg.contains("verdicts.case_id") {
        return (
            ConflictKind::VerdictExists,
            "Verdict already exists for this case",
        );
    }
    if error_msg.contains("ux_cases_join_code") || error_msg.contains("cases.join_code") {
        return (ConflictKind::JoinCodeConflict, "Join code already exists");
    }
    (
        ConflictKind::Other("Unique".into()),
        "Unique constraint violation",
    )
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("CASE_NOT_FOUND:") => {
            if let Some(case_id) = msg
                .strip_prefix("CASE_NOT_FOUND:")
                .and_then(|s| s.parse::<i64>().ok())
            {
                warn!(trace_id = %trace_id, case_id, "Case not found");
                return DomainError::not_found(
                    NotFoundKind::Case,
                    format!("Case {case_id} not found"),
                );
            }
            return DomainError::not_found(NotFoundKind::Case, "Case not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );
                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Case was modified concurrently (expected version {}, actual version {}). Please refresh and retry.",
                            info.expected, info.actual
                        ),
                    );
                }
            }
            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Case was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        let (kind, detail) = map_unique_violation(&error_msg);
        return DomainError::conflict(kind, detail);
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation("Check constraint violation");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_side_uniqueness_maps_to_side_taken() {
        let err = sea_orm::DbErr::Custom(
            "UNIQUE constraint failed: case_participants.case_id, case_participants.side"
                .to_string(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::SideTaken, _) => {}
            other => panic!("expected SideTaken, got {other:?}"),
        }
    }

    #[test]
    fn postgres_submission_uniqueness_maps_to_duplicate_submission() {
        let err = sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"ux_submissions_case_stage_side\""
                .to_string(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::DuplicateSubmission, _) => {}
            other => panic!("expected DuplicateSubmission, got {other:?}"),
        }
    }

    #[test]
    fn verdict_uniqueness_maps_to_verdict_exists() {
        let err =
            sea_orm::DbErr::Custom("UNIQUE constraint failed: verdicts.case_id".to_string());
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::VerdictExists, _) => {}
            other => panic!("expected VerdictExists, got {other:?}"),
        }
    }

    #[test]
    fn optimistic_lock_payload_is_parsed() {
        let err = sea_orm::DbErr::Custom(
            "OPTIMISTIC_LOCK:{\"expected\":3,\"actual\":4}".to_string(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
                assert!(detail.contains("expected version 3"));
            }
            other => panic!("expected OptimisticLock, got {other:?}"),
        }
    }
}
