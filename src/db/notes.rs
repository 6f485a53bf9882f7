//! Database operations for note collections.

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::note::{self, ActiveModel, Entity as NoteEntity};
use crate::error::{AppError, AppResult};
use crate::models::collection::clean;
use crate::models::note::DEFAULT_FILE_TYPE;
use crate::models::{Note, NoteInput};

use super::DbPool;
use super::users::owned_by_approved_students;

impl DbPool {
    pub async fn list_notes(&self, user_id: Uuid) -> AppResult<Vec<Note>> {
        let rows = NoteEntity::find()
            .filter(note::Column::UserId.eq(user_id))
            .order_by_asc(note::Column::Position)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list notes: {}", e)))?;

        Ok(rows.into_iter().map(Note::from).collect())
    }

    /// Replace the user's notes with `records` in one transaction.
    pub async fn replace_notes(&self, user_id: Uuid, records: Vec<NoteInput>) -> AppResult<usize> {
        let db_err = |e: DbErr| AppError::Database(format!("Failed to save notes: {}", e));
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
                subject: Set(clean(input.subject)),
                description: Set(clean(input.description)),
                file_url: Set(clean(input.file_url)),
                file_type: Set(clean(input.file_type)
                    .unwrap_or_else(|| DEFAULT_FILE_TYPE.to_string())),
                date: Set(clean(input.date)),
                created_at: Set(now),
            })
            .collect();

        let txn = self.connection().begin().await.map_err(db_err)?;

        NoteEntity::delete_many()
            .filter(note::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if !models.is_empty() {
            NoteEntity::insert_many(models)
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        Ok(count)
    }

    /// Notes of approved students saved at or after `since`.
    pub async fn count_student_notes_since(&self, since: DateTime<Utc>) -> AppResult<u64> {
        owned_by_approved_students(NoteEntity::find())
            .filter(note::Column::CreatedAt.gte(since))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count notes: {}", e)))
    }
}
