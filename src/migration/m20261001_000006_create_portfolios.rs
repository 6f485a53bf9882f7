//! Create portfolios table (one row per user).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Portfolios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Portfolios::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Portfolios::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Portfolios::Bio).text())
                    .col(ColumnDef::new(Portfolios::Degree).string())
                    .col(ColumnDef::new(Portfolios::Skills).json().not_null())
                    .col(ColumnDef::new(Portfolios::Achievements).json().not_null())
                    .col(ColumnDef::new(Portfolios::SocialLinks).json().not_null())
                    .col(
                        ColumnDef::new(Portfolios::ThemeColor)
                            .string_len(20)
                            .not_null()
                            .default("#000000"),
                    )
                    .col(
                        ColumnDef::new(Portfolios::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Portfolios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Portfolios::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolios_user_id")
                            .from(Portfolios::Table, Portfolios::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Portfolios::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    Id,
    UserId,
    Bio,
    Degree,
    Skills,
    Achievements,
    SocialLinks,
    ThemeColor,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}
