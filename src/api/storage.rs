//! File upload, delete and URL handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use tracing::info;

use crate::auth::BearerAuth;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{FileKind, FilePathRequest, FileUrlResponse, SuccessResponse, UploadResponse};
use crate::services::{Storage, accounts};

/// Read a small text field.
async fn read_text(field: &mut actix_multipart::Field) -> AppResult<String> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
        data.extend_from_slice(&chunk);
        if data.len() > 1024 {
            return Err(AppError::InvalidInput("Form field too long".to_string()));
        }
    }
    String::from_utf8(data)
        .map(|s| s.trim().to_string())
        .map_err(|_| AppError::InvalidInput("Form field is not valid UTF-8".to_string()))
}

/// Upload a file for an approved user.
///
/// The form carries `file`, `type` and `email`. The stored object key is
/// returned as `path` for later delete and URL calls.
#[utoipa::path(
    post,
    path = "/api/v1/storage/upload",
    tag = "Storage",
    request_body(
        content_type = "multipart/form-data",
        description = "Fields: file, type (project|certificate|note|resume|avatar), email"
    ),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing or invalid form field", body = crate::error::ErrorResponse),
        (status = 403, description = "Account not approved", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
        (status = 413, description = "File too large", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn upload_file(
    _auth: BearerAuth,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    config: web::Data<Config>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let max_size = config.max_upload_size;

    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut kind: Option<String> = None;
    let mut email: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .ok_or_else(|| {
                        AppError::InvalidInput("Missing filename in multipart".to_string())
                    })?
                    .to_string();
                let content_type = field.content_type().map(|m| m.essence_str().to_string());

                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk =
                        chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
                    if data.len() + chunk.len() > max_size {
                        return Err(AppError::PayloadTooLarge(format!(
                            "File exceeds the {} byte upload limit",
                            max_size
                        )));
                    }
                    data.extend_from_slice(&chunk);
                }

                file = Some((filename, content_type, data));
            }
            "type" => kind = Some(read_text(&mut field).await?),
            "email" => email = Some(read_text(&mut field).await?),
            // Unknown fields are drained and ignored
            _ => while field.next().await.is_some() {},
        }
    }

    let (filename, content_type, data) =
        file.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    let kind = kind
        .as_deref()
        .and_then(FileKind::parse)
        .ok_or_else(|| {
            AppError::InvalidInput(
                "type must be one of project, certificate, note, resume, avatar".to_string(),
            )
        })?;
    let email = email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Email is required".to_string()))?;

    let user = accounts::require_approved(&pool, &email).await?;

    // Browsers send application/octet-stream for unknown types
    let content_type = content_type.filter(|ct| ct != "application/octet-stream");
    let size = data.len();
    let key = storage
        .upload(kind, user.id, &filename, data, content_type.as_deref())
        .await?;

    info!(email = %user.email, key = %key, size, "File uploaded");

    Ok(HttpResponse::Ok().json(UploadResponse {
        url: storage.url_for(&key),
        path: key,
    }))
}

/// Delete a stored file. Deleting a missing file succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/storage/delete",
    tag = "Storage",
    request_body = FilePathRequest,
    responses(
        (status = 200, description = "File deleted", body = SuccessResponse),
        (status = 400, description = "Invalid file path", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn delete_file(
    _auth: BearerAuth,
    storage: web::Data<Storage>,
    body: web::Json<FilePathRequest>,
) -> AppResult<HttpResponse> {
    storage.delete(&body.file_path).await?;

    info!(key = %body.file_path, "File deleted");

    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}

/// Resolve the URL a stored file is served from.
#[utoipa::path(
    post,
    path = "/api/v1/storage/url",
    tag = "Storage",
    request_body = FilePathRequest,
    responses(
        (status = 200, description = "File URL", body = FileUrlResponse),
        (status = 400, description = "Invalid file path", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn file_url(
    _auth: BearerAuth,
    storage: web::Data<Storage>,
    body: web::Json<FilePathRequest>,
) -> AppResult<HttpResponse> {
    Storage::validate_key(&body.file_path)?;

    Ok(HttpResponse::Ok().json(FileUrlResponse {
        url: storage.url_for(&body.file_path),
    }))
}

/// Configure storage routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/storage/upload").route(web::post().to(upload_file)))
        .service(web::resource("/storage/delete").route(web::delete().to(delete_file)))
        .service(web::resource("/storage/url").route(web::post().to(file_url)));
}
