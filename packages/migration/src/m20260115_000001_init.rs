use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Sub,
    Username,
    IsAi,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Scenarios {
    Table,
    Id,
    Title,
    Facts,
    Category,
    CreatedAt,
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
    Title,
    Summary,
    Category,
    OpponentKind,
    AutomatedSide,
    CreatedBy,
    JoinCode,
    CurrentStage,
    Status,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum CaseParticipants {
    Table,
    Id,
    CaseId,
    UserId,
    Side,
    CreatedAt,
}

#[derive(Iden)]
enum Submissions {
    Table,
    Id,
    CaseId,
    Stage,
    Side,
    SubmitterKind,
    UserId,
    Transcript,
    AudioUrl,
    CreatedAt,
}

#[derive(Iden)]
enum Verdicts {
    Table,
    Id,
    CaseId,
    Winner,
    Result,
    SettlementApplied,
    CreatedAt,
}

#[derive(Iden)]
enum CaseResults {
    Table,
    Id,
    CaseId,
    PlaintiffUserId,
    DefendantUserId,
    Winner,
    PlaintiffScore,
    DefendantScore,
    CreatedAt,
}

#[derive(Iden)]
enum Rankings {
    Table,
    Id,
    UserId,
    Score,
    Wins,
    Losses,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Stage, side, category, status and submitter-kind values are stored as
        // short uppercase strings rather than native enums so the same schema
        // runs on Postgres and SQLite (integration tests use in-memory SQLite).

        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Sub).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsAi)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_sub_unique")
                    .table(Users::Table)
                    .col(Users::Sub)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // scenarios
        manager
            .create_table(
                Table::create()
                    .table(Scenarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scenarios::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Scenarios::Title).string().not_null())
                    .col(ColumnDef::new(Scenarios::Facts).text().not_null())
                    .col(ColumnDef::new(Scenarios::Category).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Scenarios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // cases
        manager
            .create_table(
                Table::create()
                    .table(Cases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cases::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Cases::Title).string().not_null())
                    .col(ColumnDef::new(Cases::Summary).text().not_null())
                    .col(ColumnDef::new(Cases::Category).string_len(16).not_null())
                    .col(ColumnDef::new(Cases::OpponentKind).string_len(16).not_null())
                    .col(ColumnDef::new(Cases::AutomatedSide).string_len(16).null())
                    .col(ColumnDef::new(Cases::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Cases::JoinCode).string_len(10).null())
                    .col(ColumnDef::new(Cases::CurrentStage).string_len(32).not_null())
                    .col(ColumnDef::new(Cases::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Cases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cases::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cases_created_by")
                            .from(Cases::Table, Cases::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_cases_join_code")
                    .table(Cases::Table)
                    .col(Cases::JoinCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // case_participants
        manager
            .create_table(
                Table::create()
                    .table(CaseParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseParticipants::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(CaseParticipants::CaseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CaseParticipants::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CaseParticipants::Side).string_len(16).not_null())
                    .col(
                        ColumnDef::new(CaseParticipants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_participants_case_id")
                            .from(CaseParticipants::Table, CaseParticipants::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_participants_user_id")
                            .from(CaseParticipants::Table, CaseParticipants::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one participant per (case, side) and one side per (case, user).
        manager
            .create_index(
                Index::create()
                    .name("ux_case_participants_case_side")
                    .table(CaseParticipants::Table)
                    .col(CaseParticipants::CaseId)
                    .col(CaseParticipants::Side)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_case_participants_case_user")
                    .table(CaseParticipants::Table)
                    .col(CaseParticipants::CaseId)
                    .col(CaseParticipants::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // submissions
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Submissions::CaseId).big_integer().not_null())
                    .col(ColumnDef::new(Submissions::Stage).string_len(32).not_null())
                    .col(ColumnDef::new(Submissions::Side).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Submissions::SubmitterKind)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::UserId).big_integer().null())
                    .col(ColumnDef::new(Submissions::Transcript).text().not_null())
                    .col(ColumnDef::new(Submissions::AudioUrl).string().null())
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submissions_case_id")
                            .from(Submissions::Table, Submissions::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submissions_user_id")
                            .from(Submissions::Table, Submissions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one submission per (case, stage, side).
        manager
            .create_index(
                Index::create()
                    .name("ux_submissions_case_stage_side")
                    .table(Submissions::Table)
                    .col(Submissions::CaseId)
                    .col(Submissions::Stage)
                    .col(Submissions::Side)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_case_created")
                    .table(Submissions::Table)
                    .col(Submissions::CaseId)
                    .col(Submissions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // verdicts
        manager
            .create_table(
                Table::create()
                    .table(Verdicts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Verdicts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Verdicts::CaseId).big_integer().not_null())
                    .col(ColumnDef::new(Verdicts::Winner).string_len(16).null())
                    .col(ColumnDef::new(Verdicts::Result).json().not_null())
                    .col(
                        ColumnDef::new(Verdicts::SettlementApplied)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Verdicts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_verdicts_case_id")
                            .from(Verdicts::Table, Verdicts::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One verdict per case; a second adjudication must find this row.
        manager
            .create_index(
                Index::create()
                    .name("ux_verdicts_case_id")
                    .table(Verdicts::Table)
                    .col(Verdicts::CaseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // case_results
        manager
            .create_table(
                Table::create()
                    .table(CaseResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseResults::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(CaseResults::CaseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CaseResults::PlaintiffUserId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CaseResults::DefendantUserId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(CaseResults::Winner).string_len(16).null())
                    .col(
                        ColumnDef::new(CaseResults::PlaintiffScore)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CaseResults::DefendantScore)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CaseResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_results_case_id")
                            .from(CaseResults::Table, CaseResults::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_case_results_case_id")
                    .table(CaseResults::Table)
                    .col(CaseResults::CaseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // rankings
        manager
            .create_table(
                Table::create()
                    .table(Rankings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rankings::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Rankings::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Rankings::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rankings::Wins)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rankings::Losses)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rankings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rankings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rankings_user_id")
                            .from(Rankings::Table, Rankings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_rankings_user_id")
                    .table(Rankings::Table)
                    .col(Rankings::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rankings::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CaseResults::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Verdicts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(CaseParticipants::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Cases::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Scenarios::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
