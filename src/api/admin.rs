//! Admin moderation handlers.

use actix_web::{HttpResponse, web};

use crate::auth::BearerAuth;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    AccountStatus, DeleteUserRequest, MessageResponse, PendingUsersQuery, PendingUsersResponse,
    Role, StatusChange, UpdateStatusRequest, UpdateStatusResponse,
};
use crate::services::{Storage, accounts};

/// List accounts, newest first. Counts always cover every account.
#[utoipa::path(
    get,
    path = "/api/v1/admin/pending-users",
    tag = "Admin",
    params(PendingUsersQuery),
    responses(
        (status = 200, description = "Accounts and status counts", body = PendingUsersResponse),
        (status = 400, description = "Unknown status or role filter", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn list_users(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    query: web::Query<PendingUsersQuery>,
) -> AppResult<HttpResponse> {
    let status = match query.status.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(s) => Some(
            AccountStatus::parse(s)
                .ok_or_else(|| AppError::InvalidInput(format!("Unknown status: {}", s)))?,
        ),
        None => None,
    };
    let role = match query.role.as_deref().filter(|r| !r.trim().is_empty()) {
        Some(r) => {
            Some(Role::parse(r).ok_or_else(|| AppError::InvalidInput(format!("Unknown role: {}", r)))?)
        }
        None => None,
    };

    let users = pool.list_users(status, role).await?;
    let stats = pool.count_users_by_status().await?;

    Ok(HttpResponse::Ok().json(PendingUsersResponse {
        users: users.into_iter().map(Into::into).collect(),
        stats,
    }))
}

/// Approve or reject an account.
///
/// Repeating the current status succeeds without changes; switching
/// between approved and rejected is refused.
#[utoipa::path(
    post,
    path = "/api/v1/admin/update-status",
    tag = "Admin",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status applied", body = UpdateStatusResponse),
        (status = 400, description = "Invalid target status", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Transition not allowed", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn update_status(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    body: web::Json<UpdateStatusRequest>,
) -> AppResult<HttpResponse> {
    let (user, change) = accounts::update_status(&pool, &body).await?;

    let message = match change {
        StatusChange::Changed { to, .. } => format!("User {} successfully", to),
        StatusChange::Unchanged => format!("User is already {}", user.status),
    };

    Ok(HttpResponse::Ok().json(UpdateStatusResponse {
        success: true,
        message,
        changed: change.is_changed(),
        user: user.into(),
    }))
}

/// Delete an account, its data and its stored files.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/delete-user",
    tag = "Admin",
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Bootstrap admin cannot be deleted", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn delete_user(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    config: web::Data<Config>,
    body: web::Json<DeleteUserRequest>,
) -> AppResult<HttpResponse> {
    let protected = config.admin.as_ref().map(|a| a.email.as_str());
    let user = accounts::delete_user(&pool, &storage, &body.email, protected).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::ok(format!(
        "User {} deleted",
        user.email
    ))))
}

/// Configure admin routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/admin/pending-users").route(web::get().to(list_users)))
        .service(web::resource("/admin/update-status").route(web::post().to(update_status)))
        .service(web::resource("/admin/delete-user").route(web::delete().to(delete_user)));
}
