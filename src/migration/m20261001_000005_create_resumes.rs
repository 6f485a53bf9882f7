//! Create resumes table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resumes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Resumes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Resumes::UserId).uuid().not_null())
                    .col(ColumnDef::new(Resumes::Position).integer().not_null())
                    .col(ColumnDef::new(Resumes::ClientId).string())
                    .col(ColumnDef::new(Resumes::Title).string().not_null())
                    .col(ColumnDef::new(Resumes::FileUrl).string())
                    .col(
                        ColumnDef::new(Resumes::FileType)
                            .string_len(50)
                            .not_null()
                            .default("pdf"),
                    )
                    .col(ColumnDef::new(Resumes::FileSize).string())
                    .col(
                        ColumnDef::new(Resumes::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Resumes::Date).string())
                    .col(
                        ColumnDef::new(Resumes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resumes_user_id")
                            .from(Resumes::Table, Resumes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resumes_user_position")
                    .table(Resumes::Table)
                    .col(Resumes::UserId)
                    .col(Resumes::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resumes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Resumes {
    Table,
    Id,
    UserId,
    Position,
    ClientId,
    Title,
    FileUrl,
    FileType,
    FileSize,
    IsPrimary,
    Date,
    CreatedAt,
}
