//! Database operations for portfolios.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::portfolio::{self, ActiveModel, Entity as PortfolioEntity};
use crate::error::{AppError, AppResult};
use crate::models::collection::clean;
use crate::models::portfolio::DEFAULT_THEME_COLOR;
use crate::models::{Portfolio, PortfolioInput};

use super::DbPool;

impl DbPool {
    pub async fn get_portfolio(&self, user_id: Uuid) -> AppResult<Option<Portfolio>> {
        let result = PortfolioEntity::find()
            .filter(portfolio::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get portfolio: {}", e)))?;

        Ok(result.map(Portfolio::from))
    }

    /// Insert or overwrite the user's portfolio in one statement. Absent
    /// fields take their defaults; concurrent saves end with the last one.
    pub async fn upsert_portfolio(&self, user_id: Uuid, input: PortfolioInput) -> AppResult<()> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            bio: Set(clean(input.bio)),
            degree: Set(clean(input.degree)),
            skills: Set(serde_json::json!(input.skills.unwrap_or_default())),
            achievements: Set(serde_json::json!(input.achievements.unwrap_or_default())),
            social_links: Set(serde_json::json!(input.social_links.unwrap_or_default())),
            theme_color: Set(
                clean(input.theme_color).unwrap_or_else(|| DEFAULT_THEME_COLOR.to_string())
            ),
            is_public: Set(input.is_public.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        PortfolioEntity::insert(model)
            .on_conflict(
                OnConflict::column(portfolio::Column::UserId)
                    .update_columns([
                        portfolio::Column::Bio,
                        portfolio::Column::Degree,
                        portfolio::Column::Skills,
                        portfolio::Column::Achievements,
                        portfolio::Column::SocialLinks,
                        portfolio::Column::ThemeColor,
                        portfolio::Column::IsPublic,
                        portfolio::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to save portfolio: {}", e)))?;

        Ok(())
    }
}
