//! File storage requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What an uploaded file belongs to. Decides the key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Project,
    Certificate,
    Note,
    Resume,
    Avatar,
}

impl FileKind {
    pub const ALL: [FileKind; 5] = [
        Self::Project,
        Self::Certificate,
        Self::Note,
        Self::Resume,
        Self::Avatar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Certificate => "certificate",
            Self::Note => "note",
            Self::Resume => "resume",
            Self::Avatar => "avatar",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "project" | "projects" => Some(Self::Project),
            "certificate" | "certificates" => Some(Self::Certificate),
            "note" | "notes" => Some(Self::Note),
            "resume" | "resumes" => Some(Self::Resume),
            "avatar" | "avatars" => Some(Self::Avatar),
            _ => None,
        }
    }

    /// Top-level key prefix, e.g. `projects`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Certificate => "certificates",
            Self::Note => "notes",
            Self::Resume => "resumes",
            Self::Avatar => "avatars",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub url: String,
    /// Object key, used for later delete/url calls
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilePathRequest {
    #[serde(alias = "file_path", alias = "path")]
    pub file_path: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileUrlResponse {
    pub url: String,
}
