//! User record and bulk data handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::auth::BearerAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{UpdateUserRequest, UserDataBundle, UserEnvelope};
use crate::services::accounts;

/// Get a user by email. Available in every account status so the client
/// can show pending and rejected users their own record.
#[utoipa::path(
    get,
    path = "/api/v1/user/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "User record", body = UserEnvelope),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_user(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let email = accounts::normalize_email(&path);

    let user = pool
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserEnvelope { user: user.into() }))
}

/// Edit name, department, year/semester or designation.
#[utoipa::path(
    post,
    path = "/api/v1/user",
    tag = "Users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserEnvelope),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn update_user(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let email = accounts::normalize_email(&body.email);

    let user = pool
        .update_user_profile(&email, &body)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    info!(email = %email, "User profile updated");

    Ok(HttpResponse::Ok().json(UserEnvelope { user: user.into() }))
}

/// Load everything an approved user owns in one call.
#[utoipa::path(
    get,
    path = "/api/v1/user-data/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "User data", body = UserDataBundle),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_user_data(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    let id = user.id;

    let bundle = UserDataBundle {
        projects: pool.list_projects(id).await?,
        certificates: pool.list_certificates(id).await?,
        notes: pool.list_notes(id).await?,
        resumes: pool.list_resumes(id).await?,
        portfolio: pool.get_portfolio(id).await?,
        profile: pool.get_profile(id).await?,
        user: user.into(),
    };

    Ok(HttpResponse::Ok().json(bundle))
}

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/user").route(web::post().to(update_user)))
        .service(web::resource("/user/{email}").route(web::get().to(get_user)))
        .service(web::resource("/user-data/{email}").route(web::get().to(get_user_data)));
}
