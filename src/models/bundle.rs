//! Everything one user owns, loaded in a single call.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Certificate, Note, Portfolio, Profile, Project, Resume, UserResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDataBundle {
    pub user: UserResponse,
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
    pub notes: Vec<Note>,
    pub resumes: Vec<Resume>,
    pub portfolio: Option<Portfolio>,
    pub profile: Option<Profile>,
}
