//! Extended profile (one per user).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::collection::{first_filled, opt_string_or_number, string_list};
use crate::entity::profile;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", from = "ProfileWire")]
pub struct ProfileInput {
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub bio: Option<String>,
    pub cgpa: Option<String>,
    pub course: Option<String>,
    pub college: Option<String>,
    pub skills: Option<Vec<String>>,
    pub achievements: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileWire {
    avatar_url: Option<String>,
    #[serde(rename = "avatar_url")]
    avatar_url_snake: Option<String>,
    profile_image: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    phone: Option<String>,
    location: Option<String>,
    website: Option<String>,
    linkedin_url: Option<String>,
    #[serde(rename = "linkedin_url")]
    linkedin_url_snake: Option<String>,
    github_url: Option<String>,
    #[serde(rename = "github_url")]
    github_url_snake: Option<String>,
    bio: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    cgpa: Option<String>,
    course: Option<String>,
    college: Option<String>,
    skills: Option<Vec<String>>,
    achievements: Option<Vec<String>>,
}

impl From<ProfileWire> for ProfileInput {
    fn from(w: ProfileWire) -> Self {
        Self {
            avatar_url: first_filled([w.avatar_url, w.avatar_url_snake, w.profile_image]),
            phone: w.phone,
            location: w.location,
            website: w.website,
            linkedin_url: first_filled([w.linkedin_url, w.linkedin_url_snake]),
            github_url: first_filled([w.github_url, w.github_url_snake]),
            bio: w.bio,
            cgpa: w.cgpa,
            course: w.course,
            college: w.college,
            skills: w.skills,
            achievements: w.achievements,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub bio: Option<String>,
    pub cgpa: Option<String>,
    pub course: Option<String>,
    pub college: Option<String>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<profile::Model> for Profile {
    fn from(m: profile::Model) -> Self {
        Self {
            avatar_url: m.avatar_url,
            phone: m.phone,
            location: m.location,
            website: m.website,
            linkedin_url: m.linkedin_url,
            github_url: m.github_url,
            bio: m.bio,
            cgpa: m.cgpa,
            course: m.course,
            college: m.college,
            skills: string_list(m.skills),
            achievements: string_list(m.achievements),
            updated_at: m.updated_at,
        }
    }
}
