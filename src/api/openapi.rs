//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Portfolio Server",
        version = "0.3.0",
        description = "API server for student academic portfolios: admin-approved accounts, per-user collections, portfolio pages and file storage"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Auth endpoints
        api::auth::signup,
        api::auth::login,
        api::auth::check_email,
        api::auth::check_roll_no,
        api::auth::generate_otp,
        api::auth::verify_otp,
        // User endpoints
        api::users::get_user,
        api::users::update_user,
        api::users::get_user_data,
        // Collection endpoints
        api::collections::get_projects,
        api::collections::save_projects,
        api::collections::get_certificates,
        api::collections::save_certificates,
        api::collections::get_notes,
        api::collections::save_notes,
        api::collections::get_resumes,
        api::collections::save_resumes,
        // Portfolio and profile endpoints
        api::singletons::get_portfolio,
        api::singletons::save_portfolio,
        api::singletons::get_public_portfolio,
        api::singletons::get_profile,
        api::singletons::save_profile,
        // Admin endpoints
        api::admin::list_users,
        api::admin::update_status,
        api::admin::delete_user,
        // Teacher endpoints
        api::teacher::list_students,
        api::teacher::student_files,
        // Storage endpoints
        api::storage::upload_file,
        api::storage::delete_file,
        api::storage::file_url,
        api::files::serve_file,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::SuccessResponse,
            models::MessageResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Accounts
            models::Role,
            models::AccountStatus,
            models::Dashboard,
            models::UserResponse,
            models::UserEnvelope,
            models::SignupRequest,
            models::SignupResponse,
            models::LoginRequest,
            models::LoginResponse,
            models::CheckEmailRequest,
            models::CheckRollNoRequest,
            models::AvailabilityResponse,
            models::GenerateOtpRequest,
            models::GenerateOtpResponse,
            models::VerifyOtpRequest,
            models::UpdateUserRequest,
            models::UserDataBundle,
            // Collections
            models::SaveResponse,
            models::ProjectInput,
            models::Project,
            models::CertificateInput,
            models::Certificate,
            models::NoteInput,
            models::Note,
            models::ResumeInput,
            models::Resume,
            // Portfolio and profile
            models::SocialLinks,
            models::PortfolioInput,
            models::Portfolio,
            models::PublicPortfolio,
            models::ProfileInput,
            models::Profile,
            // Admin
            models::StatusStats,
            models::PendingUsersResponse,
            models::UpdateStatusRequest,
            models::UpdateStatusResponse,
            models::DeleteUserRequest,
            // Teacher
            models::StudentSummary,
            models::TeacherStats,
            models::StudentsResponse,
            models::StudentFilesResponse,
            // Storage
            models::FileKind,
            models::UploadResponse,
            models::FilePathRequest,
            models::FileUrlResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Signup, login and email verification"),
        (name = "Users", description = "User records and bulk data"),
        (name = "Collections", description = "Projects, certificates, notes and resumes"),
        (name = "Portfolio", description = "Portfolio page"),
        (name = "Profile", description = "Extended profile"),
        (name = "Admin", description = "Account moderation"),
        (name = "Teacher", description = "Read-only student views"),
        (name = "Storage", description = "File upload and serving")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add bearer token security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
    }
}
