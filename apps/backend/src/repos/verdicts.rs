//! Verdict repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::verdicts_sea as verdicts_adapter;
use crate::domain::verdict::AdjudicationOutcome;
use crate::domain::Side;
use crate::entities::verdicts;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// The persisted adjudication result for a case.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub id: i64,
    pub case_id: i64,
    pub winner: Option<Side>,
    pub outcome: AdjudicationOutcome,
    pub settlement_applied: bool,
    pub created_at: time::OffsetDateTime,
}

impl TryFrom<verdicts::Model> for Verdict {
    type Error = DomainError;

    fn try_from(m: verdicts::Model) -> Result<Self, Self::Error> {
        let outcome: AdjudicationOutcome = serde_json::from_value(m.result).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("verdict {} result does not decode: {e}", m.id),
            )
        })?;

        Ok(Self {
            id: m.id,
            case_id: m.case_id,
            winner: m.winner.map(Side::from),
            outcome,
            settlement_applied: m.settlement_applied,
            created_at: m.created_at,
        })
    }
}

pub async fn find_by_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Option<Verdict>, DomainError> {
    let row = verdicts_adapter::find_by_case(conn, case_id).await?;
    row.map(Verdict::try_from).transpose()
}

pub async fn require_by_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
) -> Result<Verdict, DomainError> {
    find_by_case(conn, case_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Verdict,
            format!("No verdict for case {case_id}"),
        )
    })
}

/// Persist an outcome. The unique case_id constraint backs the exactly-once
/// guarantee; callers translate the `VerdictExists` conflict into a no-op.
pub async fn insert_verdict<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: i64,
    outcome: &AdjudicationOutcome,
) -> Result<Verdict, DomainError> {
    let result = serde_json::to_value(outcome).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Serde".into()),
            format!("outcome does not serialize: {e}"),
        )
    })?;

    let row = verdicts_adapter::insert_verdict(
        conn,
        verdicts_adapter::VerdictCreate::new(case_id, outcome.winner.map(Into::into), result),
    )
    .await?;
    Verdict::try_from(row)
}

/// Claim settlement; true when this caller owns the ranking application.
pub async fn try_mark_settlement_applied<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    verdict_id: i64,
) -> Result<bool, DomainError> {
    Ok(verdicts_adapter::try_mark_settlement_applied(conn, verdict_id).await?)
}
