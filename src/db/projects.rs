//! Database operations for project collections.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::project::{self, ActiveModel, Entity as ProjectEntity};
use crate::error::{AppError, AppResult};
use crate::models::collection::clean;
use crate::models::project::clamp_progress;
use crate::models::{Project, ProjectInput};

use super::DbPool;
use super::users::owned_by_approved_students;

impl DbPool {
    /// A user's projects in saved order.
    pub async fn list_projects(&self, user_id: Uuid) -> AppResult<Vec<Project>> {
        let rows = ProjectEntity::find()
            .filter(project::Column::UserId.eq(user_id))
            .order_by_asc(project::Column::Position)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list projects: {}", e)))?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Replace the user's projects with `records` in one transaction.
    pub async fn replace_projects(
        &self,
        user_id: Uuid,
        records: Vec<ProjectInput>,
    ) -> AppResult<usize> {
        let db_err = |e: DbErr| AppError::Database(format!("Failed to save projects: {}", e));
        let now = Utc::now();
        let count = records.len();

        let models: Vec<ActiveModel> = records
            .into_iter()
            .enumerate()
            .map(|(position, input)| to_active_model(user_id, position, input, now))
            .collect();

        let txn = self.connection().begin().await.map_err(db_err)?;

        ProjectEntity::delete_many()
            .filter(project::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if !models.is_empty() {
            ProjectEntity::insert_many(models)
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        Ok(count)
    }

    /// Project count per approved student.
    pub async fn count_projects_per_student(&self) -> AppResult<HashMap<Uuid, u64>> {
        let rows: Vec<(Uuid, i64)> = owned_by_approved_students(ProjectEntity::find())
            .select_only()
            .column(project::Column::UserId)
            .column_as(Expr::col((project::Entity, project::Column::Id)).count(), "count")
            .group_by(project::Column::UserId)
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count projects: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(id, n)| (id, u64::try_from(n).unwrap_or(0)))
            .collect())
    }

    /// Projects of approved students saved at or after `since`.
    pub async fn count_student_projects_since(&self, since: DateTime<Utc>) -> AppResult<u64> {
        owned_by_approved_students(ProjectEntity::find())
            .filter(project::Column::CreatedAt.gte(since))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count projects: {}", e)))
    }
}

fn to_active_model(
    user_id: Uuid,
    position: usize,
    input: ProjectInput,
    now: DateTime<Utc>,
) -> ActiveModel {
    let technologies: Vec<String> = input
        .technologies
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(user_id),
        position: Set(position as i32),
        client_id: Set(clean(input.id)),
        title: Set(clean(input.title).unwrap_or_default()),
        description: Set(clean(input.description)),
        technologies: Set(serde_json::json!(technologies)),
        github_url: Set(clean(input.github_url)),
        live_url: Set(clean(input.live_url)),
        file_url: Set(clean(input.file_url)),
        image_url: Set(clean(input.image_url)),
        file_type: Set(clean(input.file_type)),
        file_size: Set(clean(input.file_size)),
        category: Set(clean(input.category)),
        semester: Set(clean(input.semester)),
        subject: Set(clean(input.subject)),
        branch: Set(clean(input.branch)),
        version: Set(clean(input.version)),
        progress: Set(clamp_progress(input.progress)),
        date: Set(clean(input.date)),
        start_date: Set(clean(input.start_date)),
        end_date: Set(clean(input.end_date)),
        created_at: Set(now),
    }
}
