//! Error codes for the courtroom backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the courtroom backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP ProblemDetails responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Invalid case ID provided
    InvalidCaseId,
    /// Invalid scenario ID provided
    InvalidScenarioId,
    /// Submission carries neither transcript nor audio reference
    MissingTranscript,
    /// Submission targets a stage other than the case's current stage
    StageMismatch,
    /// Case already adjudicated / completed
    CaseCompleted,
    /// Caller is not a participant of the case
    NotAParticipant,
    /// Case does not have an automated opponent
    OpponentNotAutomated,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource not found
    /// Case not found
    CaseNotFound,
    /// Scenario not found
    ScenarioNotFound,
    /// User not found
    UserNotFound,
    /// Verdict not found (adjudication has not produced a result yet)
    VerdictNotFound,
    /// General not found error
    NotFound,

    // Business logic conflicts
    /// Side already taken by another participant
    SideTaken,
    /// Identity already joined this case
    AlreadyJoined,
    /// A submission for this (case, stage, side) already exists
    DuplicateSubmission,
    /// Join code already exists
    JoinCodeConflict,
    /// Verdict already exists for this case
    VerdictExists,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Readiness
    /// Adjudication attempted before both sides joined
    VerdictNotReady,

    // External collaborators
    /// Collaborator call failed after bounded retries
    UpstreamFailure,

    // System errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical wire string for this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidCaseId => "INVALID_CASE_ID",
            ErrorCode::InvalidScenarioId => "INVALID_SCENARIO_ID",
            ErrorCode::MissingTranscript => "MISSING_TRANSCRIPT",
            ErrorCode::StageMismatch => "STAGE_MISMATCH",
            ErrorCode::CaseCompleted => "CASE_COMPLETED",
            ErrorCode::NotAParticipant => "NOT_A_PARTICIPANT",
            ErrorCode::OpponentNotAutomated => "OPPONENT_NOT_AUTOMATED",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::CaseNotFound => "CASE_NOT_FOUND",
            ErrorCode::ScenarioNotFound => "SCENARIO_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::VerdictNotFound => "VERDICT_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::SideTaken => "SIDE_TAKEN",
            ErrorCode::AlreadyJoined => "ALREADY_JOINED",
            ErrorCode::DuplicateSubmission => "DUPLICATE_SUBMISSION",
            ErrorCode::JoinCodeConflict => "JOIN_CODE_CONFLICT",
            ErrorCode::VerdictExists => "VERDICT_EXISTS",
            ErrorCode::OptimisticLock => "OPTIMISTIC_LOCK",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::VerdictNotReady => "VERDICT_NOT_READY",
            ErrorCode::UpstreamFailure => "UPSTREAM_FAILURE",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::DbUnavailable => "DB_UNAVAILABLE",
            ErrorCode::RecordNotFound => "RECORD_NOT_FOUND",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::ErrorCode;

    const ALL: &[ErrorCode] = &[
        ErrorCode::InvalidCaseId,
        ErrorCode::InvalidScenarioId,
        ErrorCode::MissingTranscript,
        ErrorCode::StageMismatch,
        ErrorCode::CaseCompleted,
        ErrorCode::NotAParticipant,
        ErrorCode::OpponentNotAutomated,
        ErrorCode::ValidationError,
        ErrorCode::BadRequest,
        ErrorCode::CaseNotFound,
        ErrorCode::ScenarioNotFound,
        ErrorCode::UserNotFound,
        ErrorCode::VerdictNotFound,
        ErrorCode::NotFound,
        ErrorCode::SideTaken,
        ErrorCode::AlreadyJoined,
        ErrorCode::DuplicateSubmission,
        ErrorCode::JoinCodeConflict,
        ErrorCode::VerdictExists,
        ErrorCode::OptimisticLock,
        ErrorCode::Conflict,
        ErrorCode::VerdictNotReady,
        ErrorCode::UpstreamFailure,
        ErrorCode::DbError,
        ErrorCode::DbUnavailable,
        ErrorCode::RecordNotFound,
        ErrorCode::Internal,
        ErrorCode::ConfigError,
    ];

    #[test]
    fn wire_strings_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.as_str()), "duplicate code {}", code.as_str());
        }
    }

    #[test]
    fn wire_strings_are_screaming_snake_case() {
        for code in ALL {
            let s = code.as_str();
            assert!(
                s.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
                "bad code format {s}"
            );
        }
    }
}
