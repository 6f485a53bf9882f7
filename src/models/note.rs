//! Study note records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::collection::{Titled, first_filled, opt_string_or_number};
use crate::entity::note;

pub const DEFAULT_FILE_TYPE: &str = "pdf";

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", from = "NoteWire")]
pub struct NoteInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteWire {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    id: Option<String>,
    title: Option<String>,
    name: Option<String>,
    subject: Option<String>,
    category: Option<String>,
    description: Option<String>,
    file_url: Option<String>,
    #[serde(rename = "file_url")]
    file_url_snake: Option<String>,
    url: Option<String>,
    file_type: Option<String>,
    #[serde(rename = "file_type")]
    file_type_snake: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    date: Option<String>,
}

impl From<NoteWire> for NoteInput {
    fn from(w: NoteWire) -> Self {
        Self {
            id: w.id,
            title: first_filled([w.title, w.name]),
            subject: first_filled([w.subject, w.category]),
            description: w.description,
            file_url: first_filled([w.file_url, w.file_url_snake, w.url]),
            file_type: first_filled([w.file_type, w.file_type_snake, w.kind]),
            date: w.date,
        }
    }
}

impl Titled for NoteInput {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub file_type: String,
    pub date: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<note::Model> for Note {
    fn from(m: note::Model) -> Self {
        Self {
            id: m.client_id.unwrap_or_else(|| m.id.to_string()),
            title: m.title,
            subject: m.subject,
            description: m.description,
            file_url: m.file_url,
            file_type: m.file_type,
            date: m.date,
            created_at: m.created_at,
        }
    }
}
