//! Teacher dashboard views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::certificate::Certificate;
use super::note::Note;
use super::project::Project;
use super::resume::Resume;

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StudentsQuery {
    /// Case-insensitive match on name, email or roll number
    pub search: Option<String>,
    pub department: Option<String>,
    pub year_semester: Option<String>,
}

/// One approved student in the teacher list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub email: String,
    pub name: String,
    pub roll_no: Option<String>,
    pub department: Option<String>,
    pub year_semester: Option<String>,
    pub created_at: DateTime<Utc>,
    pub project_count: u64,
    pub certificate_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStats {
    pub total_students: u64,
    pub total_projects: u64,
    pub total_certificates: u64,
    /// Records saved in the last seven days
    pub recent_activities: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentsResponse {
    pub students: Vec<StudentSummary>,
    pub stats: TeacherStats,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentFilesResponse {
    pub student: StudentSummary,
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
    pub notes: Vec<Note>,
    pub resumes: Vec<Resume>,
}
