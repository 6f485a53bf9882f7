//! Portfolio and profile handlers. Each user has at most one of each.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::auth::BearerAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    AccountStatus, Portfolio, PortfolioInput, Profile, ProfileInput, PublicPortfolio,
    SuccessResponse,
};
use crate::services::accounts;

#[utoipa::path(
    get,
    path = "/api/v1/portfolio/{email}",
    tag = "Portfolio",
    params(("email" = String, Path, description = "Owner email")),
    responses(
        (status = 200, description = "Portfolio, or null when none was saved", body = Option<Portfolio>),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_portfolio(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(pool.get_portfolio(user.id).await?))
}

/// Save the portfolio. The body is the whole record: omitted fields reset
/// to their defaults.
#[utoipa::path(
    post,
    path = "/api/v1/portfolio/{email}",
    tag = "Portfolio",
    params(("email" = String, Path, description = "Owner email")),
    request_body = PortfolioInput,
    responses(
        (status = 200, description = "Portfolio saved", body = SuccessResponse),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn save_portfolio(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<PortfolioInput>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    pool.upsert_portfolio(user.id, body.into_inner()).await?;

    info!(email = %user.email, "Portfolio saved");

    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}

/// Data for the shareable portfolio page. A private portfolio answers
/// exactly like a missing one.
#[utoipa::path(
    get,
    path = "/api/v1/portfolio/{email}/public",
    tag = "Portfolio",
    params(("email" = String, Path, description = "Owner email")),
    responses(
        (status = 200, description = "Public portfolio", body = PublicPortfolio),
        (status = 404, description = "No public portfolio", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_public_portfolio(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let not_found = || AppError::NotFound("Portfolio not found".to_string());

    let user = pool
        .find_user_by_email(&accounts::normalize_email(&path))
        .await?
        .filter(|u| u.status == AccountStatus::Approved)
        .ok_or_else(not_found)?;

    let portfolio = pool
        .get_portfolio(user.id)
        .await?
        .filter(|p| p.is_public)
        .ok_or_else(not_found)?;

    let page = PublicPortfolio {
        projects: pool.list_projects(user.id).await?,
        certificates: pool.list_certificates(user.id).await?,
        name: user.full_name,
        department: user.department,
        year_semester: user.year_semester,
        portfolio,
    };

    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/profile/{email}",
    tag = "Profile",
    params(("email" = String, Path, description = "Owner email")),
    responses(
        (status = 200, description = "Profile, or null when none was saved", body = Option<Profile>),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_profile(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(pool.get_profile(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/profile/{email}",
    tag = "Profile",
    params(("email" = String, Path, description = "Owner email")),
    request_body = ProfileInput,
    responses(
        (status = 200, description = "Profile saved", body = SuccessResponse),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn save_profile(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ProfileInput>,
) -> AppResult<HttpResponse> {
    let user = accounts::require_approved(&pool, &path).await?;
    pool.upsert_profile(user.id, body.into_inner()).await?;

    info!(email = %user.email, "Profile saved");

    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}

/// Configure portfolio and profile routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/portfolio/{email}/public").route(web::get().to(get_public_portfolio)),
    )
    .service(
        web::resource("/portfolio/{email}")
            .route(web::get().to(get_portfolio))
            .route(web::post().to(save_portfolio)),
    )
    .service(
        web::resource("/profile/{email}")
            .route(web::get().to(get_profile))
            .route(web::post().to(save_profile)),
    );
}
