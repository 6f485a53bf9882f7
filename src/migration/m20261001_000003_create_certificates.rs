//! Create certificates table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Certificates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certificates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Certificates::UserId).uuid().not_null())
                    .col(ColumnDef::new(Certificates::Position).integer().not_null())
                    .col(ColumnDef::new(Certificates::ClientId).string())
                    .col(ColumnDef::new(Certificates::Title).string().not_null())
                    .col(ColumnDef::new(Certificates::Issuer).string())
                    .col(ColumnDef::new(Certificates::IssueDate).string())
                    .col(ColumnDef::new(Certificates::CredentialId).string())
                    .col(ColumnDef::new(Certificates::CredentialUrl).string())
                    .col(ColumnDef::new(Certificates::FileUrl).string())
                    .col(ColumnDef::new(Certificates::FileType).string())
                    .col(ColumnDef::new(Certificates::UploadType).string_len(10))
                    .col(ColumnDef::new(Certificates::Category).string())
                    .col(ColumnDef::new(Certificates::Description).text())
                    .col(
                        ColumnDef::new(Certificates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_certificates_user_id")
                            .from(Certificates::Table, Certificates::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_certificates_user_position")
                    .table(Certificates::Table)
                    .col(Certificates::UserId)
                    .col(Certificates::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Certificates::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Certificates {
    Table,
    Id,
    UserId,
    Position,
    ClientId,
    Title,
    Issuer,
    IssueDate,
    CredentialId,
    CredentialUrl,
    FileUrl,
    FileType,
    UploadType,
    Category,
    Description,
    CreatedAt,
}
