//! Project records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::collection::{Titled, first_filled, opt_string_or_number, string_list};
use crate::entity::project;

/// Project as submitted by the client. Decoded through [`ProjectWire`] so
/// every spelling the web client has used is accepted, including records
/// that carry several spellings of the same field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", from = "ProjectWire")]
pub struct ProjectInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub file_url: Option<String>,
    pub image_url: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<String>,
    pub category: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    pub branch: Option<String>,
    pub version: Option<String>,
    /// Percent complete, clamped to 0-100
    pub progress: Option<f64>,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectWire {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    id: Option<String>,
    title: Option<String>,
    name: Option<String>,
    description: Option<String>,
    technologies: Option<Vec<String>>,
    tags: Option<Vec<String>>,
    github_url: Option<String>,
    #[serde(rename = "github_url")]
    github_url_snake: Option<String>,
    github_link: Option<String>,
    live_url: Option<String>,
    #[serde(rename = "live_url")]
    live_url_snake: Option<String>,
    file_url: Option<String>,
    #[serde(rename = "file_url")]
    file_url_snake: Option<String>,
    url: Option<String>,
    image_url: Option<String>,
    #[serde(rename = "image_url")]
    image_url_snake: Option<String>,
    file_type: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    file_size: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    size: Option<String>,
    category: Option<String>,
    semester: Option<String>,
    subject: Option<String>,
    branch: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    version: Option<String>,
    progress: Option<f64>,
    date: Option<String>,
    start_date: Option<String>,
    #[serde(rename = "start_date")]
    start_date_snake: Option<String>,
    end_date: Option<String>,
    #[serde(rename = "end_date")]
    end_date_snake: Option<String>,
}

impl From<ProjectWire> for ProjectInput {
    fn from(w: ProjectWire) -> Self {
        Self {
            id: w.id,
            title: first_filled([w.title, w.name]),
            description: w.description,
            technologies: w.technologies.or(w.tags),
            github_url: first_filled([w.github_url, w.github_url_snake, w.github_link]),
            live_url: first_filled([w.live_url, w.live_url_snake]),
            file_url: first_filled([w.file_url, w.file_url_snake, w.url]),
            image_url: first_filled([w.image_url, w.image_url_snake]),
            file_type: first_filled([w.file_type, w.kind]),
            file_size: first_filled([w.file_size, w.size]),
            category: w.category,
            semester: w.semester,
            subject: w.subject,
            branch: w.branch,
            version: w.version,
            progress: w.progress,
            date: w.date,
            start_date: first_filled([w.start_date, w.start_date_snake]),
            end_date: first_filled([w.end_date, w.end_date_snake]),
        }
    }
}

impl Titled for ProjectInput {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Clamp a client progress value into 0-100.
pub fn clamp_progress(progress: Option<f64>) -> Option<i32> {
    progress
        .filter(|p| p.is_finite())
        .map(|p| p.round().clamp(0.0, 100.0) as i32)
}

/// Project as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub file_url: Option<String>,
    pub image_url: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<String>,
    pub category: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    pub branch: Option<String>,
    pub version: Option<String>,
    pub progress: Option<i32>,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<project::Model> for Project {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.client_id.unwrap_or_else(|| m.id.to_string()),
            title: m.title,
            description: m.description,
            technologies: string_list(m.technologies),
            github_url: m.github_url,
            live_url: m.live_url,
            file_url: m.file_url,
            image_url: m.image_url,
            file_type: m.file_type,
            file_size: m.file_size,
            category: m.category,
            semester: m.semester,
            subject: m.subject,
            branch: m.branch,
            version: m.version,
            progress: m.progress,
            date: m.date,
            start_date: m.start_date,
            end_date: m.end_date,
            created_at: m.created_at,
        }
    }
}
