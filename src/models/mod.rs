//! Domain models for the portfolio server.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod admin;
pub mod bundle;
pub mod certificate;
pub mod collection;
pub mod note;
pub mod portfolio;
pub mod profile;
pub mod project;
pub mod resume;
pub mod storage;
pub mod teacher;
pub mod user;

// Re-export commonly used types
pub use admin::{
    DeleteUserRequest, PendingUsersQuery, PendingUsersResponse, StatusStats, UpdateStatusRequest,
    UpdateStatusResponse,
};
pub use bundle::UserDataBundle;
pub use certificate::{Certificate, CertificateInput};
pub use collection::{SaveResponse, Titled, first_untitled};
pub use note::{Note, NoteInput};
pub use portfolio::{Portfolio, PortfolioInput, PublicPortfolio, SocialLinks};
pub use profile::{Profile, ProfileInput};
pub use project::{Project, ProjectInput};
pub use resume::{Resume, ResumeInput};
pub use storage::{FileKind, FilePathRequest, FileUrlResponse, UploadResponse};
pub use teacher::{
    StudentFilesResponse, StudentSummary, StudentsQuery, StudentsResponse, TeacherStats,
};
pub use user::{
    AccountStatus, AvailabilityResponse, CheckEmailRequest, CheckRollNoRequest, Dashboard,
    GenerateOtpRequest, GenerateOtpResponse, LoginRequest, LoginResponse, NewUser, Role,
    SignupRequest, SignupResponse, StatusChange, TransitionError, UpdateUserRequest, User,
    UserEnvelope, UserResponse, VerifyOtpRequest,
};

/// Plain acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Acknowledgement with a message for the client to display.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
