//! Create notes table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Notes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Notes::UserId).uuid().not_null())
                    .col(ColumnDef::new(Notes::Position).integer().not_null())
                    .col(ColumnDef::new(Notes::ClientId).string())
                    .col(ColumnDef::new(Notes::Title).string().not_null())
                    .col(ColumnDef::new(Notes::Subject).string())
                    .col(ColumnDef::new(Notes::Description).text())
                    .col(ColumnDef::new(Notes::FileUrl).string())
                    .col(
                        ColumnDef::new(Notes::FileType)
                            .string_len(50)
                            .not_null()
                            .default("pdf"),
                    )
                    .col(ColumnDef::new(Notes::Date).string())
                    .col(
                        ColumnDef::new(Notes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notes_user_id")
                            .from(Notes::Table, Notes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notes_user_position")
                    .table(Notes::Table)
                    .col(Notes::UserId)
                    .col(Notes::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Notes {
    Table,
    Id,
    UserId,
    Position,
    ClientId,
    Title,
    Subject,
    Description,
    FileUrl,
    FileType,
    Date,
    CreatedAt,
}
