//! Portfolio page (one per user).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::certificate::Certificate;
use super::collection::{first_filled, string_list};
use super::project::Project;
use crate::entity::portfolio;

pub const DEFAULT_THEME_COLOR: &str = "#000000";

/// Links shown on the portfolio page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SocialLinks {
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", from = "PortfolioWire")]
pub struct PortfolioInput {
    pub bio: Option<String>,
    pub degree: Option<String>,
    pub skills: Option<Vec<String>>,
    pub achievements: Option<Vec<String>>,
    pub social_links: Option<SocialLinks>,
    pub theme_color: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortfolioWire {
    bio: Option<String>,
    about_me: Option<String>,
    degree: Option<String>,
    skills: Option<Vec<String>>,
    achievements: Option<Vec<String>>,
    social_links: Option<SocialLinks>,
    #[serde(rename = "social_links")]
    social_links_snake: Option<SocialLinks>,
    theme_color: Option<String>,
    #[serde(rename = "theme_color")]
    theme_color_snake: Option<String>,
    theme: Option<String>,
    is_public: Option<bool>,
    #[serde(rename = "is_public")]
    is_public_snake: Option<bool>,
}

impl From<PortfolioWire> for PortfolioInput {
    fn from(w: PortfolioWire) -> Self {
        Self {
            bio: first_filled([w.bio, w.about_me]),
            degree: w.degree,
            skills: w.skills,
            achievements: w.achievements,
            social_links: w.social_links.or(w.social_links_snake),
            theme_color: first_filled([w.theme_color, w.theme_color_snake, w.theme]),
            is_public: w.is_public.or(w.is_public_snake),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub bio: Option<String>,
    pub degree: Option<String>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
    pub social_links: SocialLinks,
    pub theme_color: String,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<portfolio::Model> for Portfolio {
    fn from(m: portfolio::Model) -> Self {
        Self {
            bio: m.bio,
            degree: m.degree,
            skills: string_list(m.skills),
            achievements: string_list(m.achievements),
            social_links: serde_json::from_value(m.social_links).unwrap_or_default(),
            theme_color: m.theme_color,
            is_public: m.is_public,
            updated_at: m.updated_at,
        }
    }
}

/// Data for the shareable portfolio page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicPortfolio {
    pub name: String,
    pub department: Option<String>,
    pub year_semester: Option<String>,
    pub portfolio: Portfolio,
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
}
