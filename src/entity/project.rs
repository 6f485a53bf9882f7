//! Project entity. One row per project in a user's saved list.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    /// Index in the list the client saved
    pub position: i32,
    /// Identifier the client assigned, echoed back unchanged
    pub client_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub technologies: Json,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub file_url: Option<String>,
    pub image_url: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<String>,
    pub category: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    /// Stored and returned, never interpreted
    pub branch: Option<String>,
    /// Stored and returned, never interpreted
    pub version: Option<String>,
    pub progress: Option<i32>,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
