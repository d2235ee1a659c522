use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External subject identifier from the (out-of-scope) auth collaborator.
    pub sub: String,
    pub username: String,
    /// Identities flagged non-human are excluded from ranking settlement.
    pub is_ai: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::case_participants::Entity")]
    CaseParticipants,
}

impl Related<super::case_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseParticipants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
