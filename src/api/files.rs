//! File serving API handlers.
//!
//! Streams stored objects to browsers. No token: the URLs end up in
//! `<img>` and `<a>` tags.

use actix_web::{HttpResponse, http::header, web};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::Storage;

/// Serve a stored file with its content type.
#[utoipa::path(
    get,
    path = "/api/v1/files/{key}",
    tag = "Storage",
    params(("key" = String, Path, description = "Object key returned by the upload")),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "File not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn serve_file(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = path.into_inner();

    // Anything we could not have stored is simply not found
    if Storage::validate_key(&key).is_err() {
        return Err(AppError::NotFound("File not found".to_string()));
    }

    debug!("Serving stored file: {}", key);

    let (data, content_type) = storage.get(&key).await?;

    let content_type = content_type
        .unwrap_or_else(|| Storage::content_type_for_filename(&key).to_string());

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((header::CACHE_CONTROL, "private, max-age=3600"))
        .body(data))
}

/// Configure file routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/files/{key:.*}").route(web::get().to(serve_file)));
}
