//! Campus portfolio server - main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::http::header::{self, HeaderName};
use actix_web::{App, HttpServer, Result as ActixResult, web};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use campus_portfolio_lib::AppState;
use campus_portfolio_lib::config::{API_KEY_HEADER, Config};
use campus_portfolio_lib::db::DbPool;
use campus_portfolio_lib::middleware::RequestLogger;
use campus_portfolio_lib::services::{Storage, accounts};

/// Development frontend origins.
const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// SPA fallback handler - serves index.html for client-side routing.
async fn spa_fallback(static_dir: web::Data<PathBuf>) -> ActixResult<NamedFile> {
    Ok(NamedFile::open(static_dir.join("index.html"))?)
}

/// Perform health check (for Docker healthcheck).
fn health_check() -> bool {
    // Simple check - just verify we can load config
    Config::from_env().is_ok()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_cors(allowed_origins: &[String], is_development: bool) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            HeaderName::from_static(API_KEY_HEADER),
        ])
        .max_age(3600);

    if is_development {
        for origin in DEV_ORIGINS {
            cors = cors.allowed_origin(origin);
        }
    }
    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    if std::env::args().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        std::process::exit(if health_check() { 0 } else { 1 });
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL and PORTFOLIO_API_TOKEN must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Campus Portfolio Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let pool = DbPool::new(&config.database)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!("Database connection established");

    pool.run_migrations()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!("Database migrations complete");

    if let Some(ref admin) = config.admin {
        let (user, created) = accounts::ensure_admin(&pool, admin)
            .await
            .map_err(|e| std::io::Error::other(format!("Failed to ensure admin: {}", e)))?;
        if !created {
            info!("Admin account present: {}", user.email);
        }
    }

    let storage = Storage::from_settings(&config.storage, config.is_development())
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to initialize storage: {}", e)))?;

    let bind_address = config.bind_address();
    let static_dir = config.static_dir.clone();
    let allowed_origins = config.allowed_origins.clone();
    let is_development = config.is_development();

    info!(
        "Upload limit: {}MB per file",
        config.max_upload_size / 1024 / 1024
    );

    if static_dir.is_some() {
        info!("Static file serving enabled from {:?}", static_dir);
    }

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    let state = AppState::new(pool, storage, config);

    let server = HttpServer::new(move || {
        let mut app = App::new()
            .wrap(build_cors(&allowed_origins, is_development))
            .wrap(RequestLogger)
            .configure(|cfg| state.configure(cfg));

        // Serve the built frontend when PORTFOLIO_STATIC_DIR is set
        if let Some(ref dir) = static_dir {
            app = app
                .app_data(web::Data::new(dir.clone()))
                .service(Files::new("/assets", dir.join("assets")).prefer_utf8(true))
                .service(Files::new("/favicon", dir.clone()).index_file("favicon.ico"))
                // SPA fallback - serve index.html for all other routes
                .default_service(web::route().to(spa_fallback));
        }

        app
    });

    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
