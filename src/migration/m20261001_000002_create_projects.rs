//! Create projects table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Projects::UserId).uuid().not_null())
                    .col(ColumnDef::new(Projects::Position).integer().not_null())
                    .col(ColumnDef::new(Projects::ClientId).string())
                    .col(ColumnDef::new(Projects::Title).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text())
                    .col(ColumnDef::new(Projects::Technologies).json().not_null())
                    .col(ColumnDef::new(Projects::GithubUrl).string())
                    .col(ColumnDef::new(Projects::LiveUrl).string())
                    .col(ColumnDef::new(Projects::FileUrl).string())
                    .col(ColumnDef::new(Projects::ImageUrl).string())
                    .col(ColumnDef::new(Projects::FileType).string())
                    .col(ColumnDef::new(Projects::FileSize).string())
                    .col(ColumnDef::new(Projects::Category).string())
                    .col(ColumnDef::new(Projects::Semester).string())
                    .col(ColumnDef::new(Projects::Subject).string())
                    .col(ColumnDef::new(Projects::Branch).string())
                    .col(ColumnDef::new(Projects::Version).string())
                    .col(ColumnDef::new(Projects::Progress).integer())
                    .col(ColumnDef::new(Projects::Date).string())
                    .col(ColumnDef::new(Projects::StartDate).string())
                    .col(ColumnDef::new(Projects::EndDate).string())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_user_id")
                            .from(Projects::Table, Projects::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_user_position")
                    .table(Projects::Table)
                    .col(Projects::UserId)
                    .col(Projects::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    UserId,
    Position,
    ClientId,
    Title,
    Description,
    Technologies,
    GithubUrl,
    LiveUrl,
    FileUrl,
    ImageUrl,
    FileType,
    FileSize,
    Category,
    Semester,
    Subject,
    Branch,
    Version,
    Progress,
    Date,
    StartDate,
    EndDate,
    CreatedAt,
}
