//! Per-user collections: projects, certificates, notes and resumes.
//!
//! A save replaces the whole collection with the posted list.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::auth::BearerAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    Certificate, CertificateInput, Note, NoteInput, Project, ProjectInput, Resume, ResumeInput,
    SaveResponse, Titled, first_untitled,
};
use crate::services::accounts;

/// Reject the save when any record lacks a title.
fn require_titles<T: Titled>(records: &[T]) -> AppResult<()> {
    match first_untitled(records) {
        Some(index) => Err(AppError::InvalidInput(format!(
            "Record at index {} is missing a title",
            index
        ))),
        None => Ok(()),
    }
}

fn saved(kind: &str, email: &str, count: usize) -> HttpResponse {
    info!(email = %email, kind, count, "Collection replaced");
    HttpResponse::Ok().json(SaveResponse {
        success: true,
        count,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{email}",
    tag = "Collections",
    params(("email" = String, Path, description = "Owner email")),
    responses(
        (status = 200, description = "Projects in saved order", body = Vec<Project>),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_projects(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(pool.list_projects(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/projects/{email}",
    tag = "Collections",
    params(("email" = String, Path, description = "Owner email")),
    request_body = Vec<ProjectInput>,
    responses(
        (status = 200, description = "Collection replaced", body = SaveResponse),
        (status = 400, description = "Record without a title", body = crate::error::ErrorResponse),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn save_projects(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<Vec<ProjectInput>>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    let records = body.into_inner();
    require_titles(&records)?;

    let count = pool.replace_projects(user.id, records).await?;
    Ok(saved("projects", &user.email, count))
}

#[utoipa::path(
    get,
    path = "/api/v1/certificates/{email}",
    tag = "Collections",
    params(("email" = String, Path, description = "Owner email")),
    responses(
        (status = 200, description = "Certificates in saved order", body = Vec<Certificate>),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_certificates(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(pool.list_certificates(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/certificates/{email}",
    tag = "Collections",
    params(("email" = String, Path, description = "Owner email")),
    request_body = Vec<CertificateInput>,
    responses(
        (status = 200, description = "Collection replaced", body = SaveResponse),
        (status = 400, description = "Record without a title", body = crate::error::ErrorResponse),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn save_certificates(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<Vec<CertificateInput>>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    let records = body.into_inner();
    require_titles(&records)?;

    let count = pool.replace_certificates(user.id, records).await?;
    Ok(saved("certificates", &user.email, count))
}

#[utoipa::path(
    get,
    path = "/api/v1/notes/{email}",
    tag = "Collections",
    params(("email" = String, Path, description = "Owner email")),
    responses(
        (status = 200, description = "Notes in saved order", body = Vec<Note>),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_notes(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(pool.list_notes(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/notes/{email}",
    tag = "Collections",
    params(("email" = String, Path, description = "Owner email")),
    request_body = Vec<NoteInput>,
    responses(
        (status = 200, description = "Collection replaced", body = SaveResponse),
        (status = 400, description = "Record without a title", body = crate::error::ErrorResponse),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn save_notes(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<Vec<NoteInput>>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    let records = body.into_inner();
    require_titles(&records)?;

    let count = pool.replace_notes(user.id, records).await?;
    Ok(saved("notes", &user.email, count))
}

#[utoipa::path(
    get,
    path = "/api/v1/resumes/{email}",
    tag = "Collections",
    params(("email" = String, Path, description = "Owner email")),
    responses(
        (status = 200, description = "Resumes in saved order", body = Vec<Resume>),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_resumes(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(pool.list_resumes(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/resumes/{email}",
    tag = "Collections",
    params(("email" = String, Path, description = "Owner email")),
    request_body = Vec<ResumeInput>,
    responses(
        (status = 200, description = "Collection replaced", body = SaveResponse),
        (status = 400, description = "Record without a title", body = crate::error::ErrorResponse),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn save_resumes(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<Vec<ResumeInput>>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    let records = body.into_inner();
    require_titles(&records)?;

    let count = pool.replace_resumes(user.id, records).await?;
    Ok(saved("resumes", &user.email, count))
}

/// Configure collection routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects/{email}")
            .route(web::get().to(get_projects))
            .route(web::post().to(save_projects)),
    )
    .service(
        web::resource("/certificates/{email}")
            .route(web::get().to(get_certificates))
            .route(web::post().to(save_certificates)),
    )
    .service(
        web::resource("/notes/{email}")
            .route(web::get().to(get_notes))
            .route(web::post().to(save_notes)),
    )
    .service(
        web::resource("/resumes/{email}")
            .route(web::get().to(get_resumes))
            .route(web::post().to(save_resumes)),
    );
}
