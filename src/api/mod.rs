//! API endpoint modules.

pub mod admin;
pub mod auth;
pub mod collections;
pub mod files;
pub mod health;
pub mod openapi;
pub mod singletons;
pub mod storage;
pub mod teacher;
pub mod users;

use actix_web::{HttpRequest, error::JsonPayloadError, web};

use crate::error::AppError;

pub use admin::configure_routes as configure_admin_routes;
pub use auth::configure_routes as configure_auth_routes;
pub use collections::configure_routes as configure_collection_routes;
pub use files::configure_routes as configure_file_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use singletons::configure_routes as configure_singleton_routes;
pub use storage::configure_routes as configure_storage_routes;
pub use teacher::configure_routes as configure_teacher_routes;
pub use users::configure_routes as configure_user_routes;

/// Render malformed JSON bodies in the usual `{error, code}` shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(2 * 1024 * 1024)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            let message = match err {
                JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                    return AppError::PayloadTooLarge("Request body is too large".to_string())
                        .into();
                }
                JsonPayloadError::ContentType => {
                    "Content-Type must be application/json".to_string()
                }
                other => format!("Invalid JSON body: {}", other),
            };
            AppError::InvalidInput(message).into()
        })
}

/// Mount every API route on a service config (the `/api/v1` scope).
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_collection_routes)
        .configure(configure_singleton_routes)
        .configure(configure_admin_routes)
        .configure(configure_teacher_routes)
        .configure(configure_storage_routes)
        .configure(configure_file_routes);
}
