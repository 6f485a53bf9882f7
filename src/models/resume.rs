//! Resume records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::collection::{Titled, first_filled, opt_string_or_number};
use crate::entity::resume;

pub const DEFAULT_FILE_TYPE: &str = "pdf";

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", from = "ResumeWire")]
pub struct ResumeInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<String>,
    pub is_primary: Option<bool>,
    pub date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResumeWire {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    id: Option<String>,
    title: Option<String>,
    name: Option<String>,
    file_url: Option<String>,
    #[serde(rename = "file_url")]
    file_url_snake: Option<String>,
    url: Option<String>,
    file_type: Option<String>,
    #[serde(rename = "file_type")]
    file_type_snake: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    file_size: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    size: Option<String>,
    is_primary: Option<bool>,
    #[serde(rename = "is_primary")]
    is_primary_snake: Option<bool>,
    date: Option<String>,
}

impl From<ResumeWire> for ResumeInput {
    fn from(w: ResumeWire) -> Self {
        // Either spelling set to true marks the resume primary
        let is_primary = match (w.is_primary, w.is_primary_snake) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(false) || b.unwrap_or(false)),
        };
        Self {
            id: w.id,
            title: first_filled([w.title, w.name]),
            file_url: first_filled([w.file_url, w.file_url_snake, w.url]),
            file_type: first_filled([w.file_type, w.file_type_snake, w.kind]),
            file_size: first_filled([w.file_size, w.size]),
            is_primary,
            date: w.date,
        }
    }
}

impl Titled for ResumeInput {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub title: String,
    pub file_url: Option<String>,
    pub file_type: String,
    pub file_size: Option<String>,
    pub is_primary: bool,
    pub date: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<resume::Model> for Resume {
    fn from(m: resume::Model) -> Self {
        Self {
            id: m.client_id.unwrap_or_else(|| m.id.to_string()),
            title: m.title,
            file_url: m.file_url,
            file_type: m.file_type,
            file_size: m.file_size,
            is_primary: m.is_primary,
            date: m.date,
            created_at: m.created_at,
        }
    }
}
