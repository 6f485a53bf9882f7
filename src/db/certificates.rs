//! Database operations for certificate collections.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::certificate::{self, ActiveModel, Entity as CertificateEntity};
use crate::error::{AppError, AppResult};
use crate::models::collection::clean;
use crate::models::{Certificate, CertificateInput};

use super::DbPool;
use super::users::owned_by_approved_students;

impl DbPool {
    /// A user's certificates in saved order.
    pub async fn list_certificates(&self, user_id: Uuid) -> AppResult<Vec<Certificate>> {
        let rows = CertificateEntity::find()
            .filter(certificate::Column::UserId.eq(user_id))
            .order_by_asc(certificate::Column::Position)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list certificates: {}", e)))?;

        Ok(rows.into_iter().map(Certificate::from).collect())
    }

    /// Replace the user's certificates with `records` in one transaction.
    pub async fn replace_certificates(
        &self,
        user_id: Uuid,
        records: Vec<CertificateInput>,
    ) -> AppResult<usize> {
        let db_err = |e: DbErr| AppError::Database(format!("Failed to save certificates: {}", e));
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
                issuer: Set(clean(input.issuer)),
                issue_date: Set(clean(input.issue_date)),
                credential_id: Set(clean(input.credential_id)),
                credential_url: Set(clean(input.credential_url)),
                file_url: Set(clean(input.file_url)),
                file_type: Set(clean(input.file_type)),
                upload_type: Set(clean(input.upload_type).map(|t| t.to_lowercase())),
                category: Set(clean(input.category)),
                description: Set(clean(input.description)),
                created_at: Set(now),
            })
            .collect();

        let txn = self.connection().begin().await.map_err(db_err)?;

        CertificateEntity::delete_many()
            .filter(certificate::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if !models.is_empty() {
            CertificateEntity::insert_many(models)
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        Ok(count)
    }

    /// Certificate count per approved student.
    pub async fn count_certificates_per_student(&self) -> AppResult<HashMap<Uuid, u64>> {
        let rows: Vec<(Uuid, i64)> = owned_by_approved_students(CertificateEntity::find())
            .select_only()
            .column(certificate::Column::UserId)
            .column_as(Expr::col((certificate::Entity, certificate::Column::Id)).count(), "count")
            .group_by(certificate::Column::UserId)
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count certificates: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(id, n)| (id, u64::try_from(n).unwrap_or(0)))
            .collect())
    }

    /// Certificates of approved students saved at or after `since`.
    pub async fn count_student_certificates_since(&self, since: DateTime<Utc>) -> AppResult<u64> {
        owned_by_approved_students(CertificateEntity::find())
            .filter(certificate::Column::CreatedAt.gte(since))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count certificates: {}", e)))
    }
}
