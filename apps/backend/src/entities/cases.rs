use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::{Side, Stage};

/// Stored stage values. Kept in lockstep with `domain::Stage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum CaseStage {
    #[sea_orm(string_value = "OPENING_STATEMENT")]
    OpeningStatement,
    #[sea_orm(string_value = "PLAINTIFF_ARGUMENT")]
    PlaintiffArgument,
    #[sea_orm(string_value = "CROSS_EXAMINATION")]
    CrossExamination,
    #[sea_orm(string_value = "DEFENDANT_ARGUMENT")]
    DefendantArgument,
    #[sea_orm(string_value = "CLOSING_SUBMISSION")]
    ClosingSubmission,
    #[sea_orm(string_value = "VERDICT")]
    Verdict,
}

impl From<CaseStage> for Stage {
    fn from(s: CaseStage) -> Self {
        match s {
            CaseStage::OpeningStatement => Stage::OpeningStatement,
            CaseStage::PlaintiffArgument => Stage::PlaintiffArgument,
            CaseStage::CrossExamination => Stage::CrossExamination,
            CaseStage::DefendantArgument => Stage::DefendantArgument,
            CaseStage::ClosingSubmission => Stage::ClosingSubmission,
            CaseStage::Verdict => Stage::Verdict,
        }
    }
}

impl From<Stage> for CaseStage {
    fn from(s: Stage) -> Self {
        match s {
            Stage::OpeningStatement => CaseStage::OpeningStatement,
            Stage::PlaintiffArgument => CaseStage::PlaintiffArgument,
            Stage::CrossExamination => CaseStage::CrossExamination,
            Stage::DefendantArgument => CaseStage::DefendantArgument,
            Stage::ClosingSubmission => CaseStage::ClosingSubmission,
            Stage::Verdict => CaseStage::Verdict,
        }
    }
}

/// Stored side values. Kept in lockstep with `domain::Side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CaseSide {
    #[sea_orm(string_value = "PLAINTIFF")]
    Plaintiff,
    #[sea_orm(string_value = "DEFENDANT")]
    Defendant,
}

impl From<CaseSide> for Side {
    fn from(s: CaseSide) -> Self {
        match s {
            CaseSide::Plaintiff => Side::Plaintiff,
            CaseSide::Defendant => Side::Defendant,
        }
    }
}

impl From<Side> for CaseSide {
    fn from(s: Side) -> Self {
        match s {
            Side::Plaintiff => CaseSide::Plaintiff,
            Side::Defendant => CaseSide::Defendant,
        }
    }
}

/// Exactly one of two fixed categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum CaseCategory {
    #[sea_orm(string_value = "CIVIL")]
    Civil,
    #[sea_orm(string_value = "CRIMINAL")]
    Criminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    /// Two real participants.
    #[sea_orm(string_value = "HUMAN")]
    Human,
    /// One real participant; the other side is the automated opponent.
    #[sea_orm(string_value = "AUTOMATED")]
    Automated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub category: CaseCategory,
    pub opponent_kind: OpponentKind,
    /// Which side the automated opponent argues; set iff `opponent_kind` is
    /// `Automated`.
    pub automated_side: Option<CaseSide>,
    pub created_by: i64,
    pub join_code: Option<String>,
    pub current_stage: CaseStage,
    pub status: CaseStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    /// Optimistic concurrency token; bumped by every stage transition.
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::case_participants::Entity")]
    Participants,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::case_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
