//! Database operations for resume collections.

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::resume::{self, ActiveModel, Entity as ResumeEntity};
use crate::error::{AppError, AppResult};
use crate::models::collection::clean;
use crate::models::resume::DEFAULT_FILE_TYPE;
use crate::models::{Resume, ResumeInput};

use super::DbPool;
use super::users::owned_by_approved_students;

impl DbPool {
    pub async fn list_resumes(&self, user_id: Uuid) -> AppResult<Vec<Resume>> {
        let rows = ResumeEntity::find()
            .filter(resume::Column::UserId.eq(user_id))
            .order_by_asc(resume::Column::Position)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list resumes: {}", e)))?;

        Ok(rows.into_iter().map(Resume::from).collect())
    }

    /// Replace the user's resumes with `records` in one transaction.
    pub async fn replace_resumes(
        &self,
        user_id: Uuid,
        records: Vec<ResumeInput>,
    ) -> AppResult<usize> {
        let db_err = |e: DbErr| AppError::Database(format!("Failed to save resumes: {}", e));
        let now = Utc::now();
        let count = records.len();

        let models: Vec<ActiveModel> = records
            .into_iter()
            .enumerate()
            .map(|(position, input)| ActiveModel {
                id: Set(Uuid::now_v7()),
                user_id: Set(user_id),
                position: Set(position as i32),
                client_id: Set(clean(input.id)),
                title: Set(clean(input.title).unwrap_or_default()),
                file_url: Set(clean(input.file_url)),
                file_type: Set(clean(input.file_type)
                    .unwrap_or_else(|| DEFAULT_FILE_TYPE.to_string())),
                file_size: Set(clean(input.file_size)),
                is_primary: Set(input.is_primary.unwrap_or(false)),
                date: Set(clean(input.date)),
                created_at: Set(now),
            })
            .collect();

        let txn = self.connection().begin().await.map_err(db_err)?;

        ResumeEntity::delete_many()
            .filter(resume::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if !models.is_empty() {
            ResumeEntity::insert_many(models)
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        Ok(count)
    }

    /// Resumes of approved students saved at or after `since`.
    pub async fn count_student_resumes_since(&self, since: DateTime<Utc>) -> AppResult<u64> {
        owned_by_approved_students(ResumeEntity::find())
            .filter(resume::Column::CreatedAt.gte(since))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count resumes: {}", e)))
    }
}
