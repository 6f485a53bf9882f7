//! Campus portfolio server library.
//!
//! Accounts with admin approval, per-user portfolio collections, teacher
//! views and file storage, served over actix-web.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::ApiToken;
use crate::config::Config;
use crate::db::DbPool;
use crate::services::Storage;

/// Shared state handed to every worker.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub storage: Storage,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: DbPool, storage: Storage, config: Config) -> Self {
        Self {
            pool,
            storage,
            config,
        }
    }

    /// Register app data, API docs and the `/api/v1` routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let payload_limit = self.config.max_upload_size + 64 * 1024;

        cfg.app_data(web::Data::new(self.pool.clone()))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(ApiToken::new(self.config.api_token.clone())))
            .app_data(api::json_config())
            .app_data(web::PayloadConfig::new(payload_limit))
            // Registered before the scope, which would otherwise claim /api/v1/docs
            .service(
                SwaggerUi::new("/api/v1/docs/{_:.*}")
                    .url("/api/v1/openapi.json", api::ApiDoc::openapi()),
            )
            .service(web::scope("/api/v1").configure(api::configure_api));
    }
}
