//! Database operations for extended profiles.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::profile::{self, ActiveModel, Entity as ProfileEntity};
use crate::error::{AppError, AppResult};
use crate::models::collection::clean;
use crate::models::{Profile, ProfileInput};

use super::DbPool;

impl DbPool {
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let result = ProfileEntity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get profile: {}", e)))?;

        Ok(result.map(Profile::from))
    }

    /// Insert or overwrite the user's profile in one statement.
    pub async fn upsert_profile(&self, user_id: Uuid, input: ProfileInput) -> AppResult<()> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            avatar_url: Set(clean(input.avatar_url)),
            phone: Set(clean(input.phone)),
            location: Set(clean(input.location)),
            website: Set(clean(input.website)),
            linkedin_url: Set(clean(input.linkedin_url)),
            github_url: Set(clean(input.github_url)),
            bio: Set(clean(input.bio)),
            cgpa: Set(clean(input.cgpa)),
            course: Set(clean(input.course)),
            college: Set(clean(input.college)),
            skills: Set(serde_json::json!(input.skills.unwrap_or_default())),
            achievements: Set(serde_json::json!(input.achievements.unwrap_or_default())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        ProfileEntity::insert(model)
            .on_conflict(
                OnConflict::column(profile::Column::UserId)
                    .update_columns([
                        profile::Column::AvatarUrl,
                        profile::Column::Phone,
                        profile::Column::Location,
                        profile::Column::Website,
                        profile::Column::LinkedinUrl,
                        profile::Column::GithubUrl,
                        profile::Column::Bio,
                        profile::Column::Cgpa,
                        profile::Column::Course,
                        profile::Column::College,
                        profile::Column::Skills,
                        profile::Column::Achievements,
                        profile::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to save profile: {}", e)))?;

        Ok(())
    }
}
