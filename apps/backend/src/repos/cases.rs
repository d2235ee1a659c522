//! Case repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::cases_sea as cases_adapter;
use crate::ai::CaseBrief;
use crate::domain::{Side, Stage};
use crate::entities::cases::{self, CaseCategory, CaseStatus, OpponentKind};
use crate::errors::domain::DomainError;

/// Case domain model.
///
/// Stage and sides carry the typed domain representations; category, status
/// and opponent kind reuse the stored enums directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub category: CaseCategory,
    pub opponent_kind: OpponentKind,
    pub automated_side: Option<Side>,
    pub created_by: i64,
    pub join_code: Option<String>,
    pub current_stage: Stage,
    pub status: CaseStatus,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
    pub lock_version: i32,
}

impl Case {
    pub fn is_automated(&self) -> bool {
        self.opponent_kind == OpponentKind::Automated
    }

    pub fn is_completed(&self) -> bool {
        self.status == CaseStatus::Completed
    }

    pub fn category_label(&self) -> &'static str {
        match self.category {
            CaseCategory::Civil => "Civil",
            CaseCategory::Criminal => "Criminal",
        }
    }

    /// Metadata handed to the collaborator prompts.
    pub fn brief(&self) -> CaseBrief {
        CaseBrief {
            title: self.title.clone(),
            summary: self.summary.clone(),
            category: self.category_label().to_string(),
        }
    }
}

impl From<cases::Model> for Case {
    fn from(m: cases::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            summary: m.summary,
            category: m.category,
            opponent_kind: m.opponent_kind,
            automated_side: m.automated_side.map(Side::from),
            created_by: m.created_by,
            join_code: m.join_code,
            current_stage: Stage::from(m.current_stage),
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
            lock_version: m.lock_version,
        }
    }
}

// Free functions (generic) following the adapter split.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Option<Case>, DomainError> {
    let case = cases_adapter::find_by_id(conn, case_id).await?;
    Ok(case.map(Case::from))
}

/// Find case by ID or return a typed not-found error.
pub async fn require_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Case, DomainError> {
    let case = cases_adapter::require_case(conn, case_id).await?;
    Ok(Case::from(case))
}

pub async fn find_by_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    join_code: &str,
) -> Result<Option<Case>, DomainError> {
    let case = cases_adapter::find_by_join_code(conn, join_code).await?;
    Ok(case.map(Case::from))
}

pub async fn create_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: cases_adapter::CaseCreate,
) -> Result<Case, DomainError> {
    let case = cases_adapter::create_case(conn, dto).await?;
    Ok(Case::from(case))
}

/// Compare-and-set stage transition; `Ok(None)` means a concurrent
/// submission already advanced the case past `from`.
pub async fn try_advance_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
    from: Stage,
    to: Stage,
    expected_lock_version: i32,
) -> Result<Option<Case>, DomainError> {
    let updated = cases_adapter::try_advance_stage(
        conn,
        case_id,
        from.into(),
        to.into(),
        expected_lock_version,
    )
    .await?;
    Ok(updated.map(Case::from))
}

pub async fn mark_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<(), DomainError> {
    cases_adapter::mark_completed(conn, case_id).await?;
    Ok(())
}
