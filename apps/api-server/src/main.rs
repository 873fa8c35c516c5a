//! # Inkpost API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::fs;
use std::sync::Arc;

use actix_files::Files;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use inkpost_core::ports::{PasswordService, TokenService};
use inkpost_infra::{Argon2PasswordService, JwtTokenService};
use migration::MigratorTrait;

mod config;
mod handlers;
mod middleware;
mod state;

use config::AppConfig;
use state::AppState;

/// Uploaded archives are buffered in memory before extraction.
const UPLOAD_LIMIT_BYTES: usize = 50 * 1024 * 1024;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env();
    tracing::info!(
        "Starting inkpost API server on {}:{}",
        config.host,
        config.port
    );

    prepare_directories(&config)?;

    let db = inkpost_infra::database::connect(&config.database_url).await?;
    migration::Migrator::up(&db, None).await?;

    let state = AppState::new(db, config.clone());
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    let posts_dir = config.posts_dir();
    let bind_addr = (config.host.clone(), config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&tokens)))
            .app_data(web::Data::new(Arc::clone(&passwords)))
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(UPLOAD_LIMIT_BYTES)
                    .memory_limit(UPLOAD_LIMIT_BYTES),
            )
            .configure(handlers::configure_routes)
            // Post assets are served straight from the content tree.
            .service(Files::new("/posts", posts_dir.clone()))
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}

/// Provision the content, download and database directories at boot.
fn prepare_directories(config: &AppConfig) -> std::io::Result<()> {
    fs::create_dir_all(config.posts_dir())?;
    fs::create_dir_all(config.downloads_dir())?;
    if let Some(db_file) = config.sqlite_file() {
        if let Some(parent) = db_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,inkpost_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
