//! Database operations for email verification codes.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::entity::email_verification::{self, ActiveModel, Entity as VerificationEntity};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Store a code hash for `email`, replacing any outstanding one.
    pub async fn replace_verification_code(
        &self,
        email: &str,
        code_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.delete_verification_code(email).await?;

        let model = ActiveModel {
            email: Set(email.to_string()),
            code_hash: Set(code_hash.to_string()),
            expires_at: Set(expires_at),
            verified: Set(false),
            created_at: Set(Utc::now()),
        };

        model.insert(self.connection()).await.map_err(|e| {
            AppError::Database(format!("Failed to store verification code: {}", e))
        })?;

        Ok(())
    }

    pub async fn get_verification_code(
        &self,
        email: &str,
    ) -> AppResult<Option<email_verification::Model>> {
        VerificationEntity::find_by_id(email.to_string())
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get verification code: {}", e)))
    }

    pub async fn mark_verification_verified(&self, email: &str) -> AppResult<()> {
        let existing = self
            .get_verification_code(email)
            .await?
            .ok_or_else(|| AppError::NotFound("No verification code for this email".to_string()))?;

        let mut active: ActiveModel = existing.into();
        active.verified = Set(true);
        active.update(self.connection()).await.map_err(|e| {
            AppError::Database(format!("Failed to update verification code: {}", e))
        })?;

        Ok(())
    }

    pub async fn delete_verification_code(&self, email: &str) -> AppResult<()> {
        VerificationEntity::delete_by_id(email.to_string())
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete verification code: {}", e)))?;

        Ok(())
    }
}
