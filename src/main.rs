// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, blob storage and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use config::Config;
use dotenv::dotenv;
use services::{DiskBlobBackend, PhotoStore};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        anyhow::bail!("invalid configuration: {}", e);
    }

    log::info!("Starting photoshare service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool and schema
    let pool = config::init_db_pool(&config)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    // 5. Blob storage for uploaded images
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("failed to create {}", config.upload_dir.display()))?;
    log::info!("Storing uploads in {}", config.upload_dir.display());

    let store = web::Data::new(PhotoStore::new(
        pool,
        Arc::new(DiskBlobBackend::new(config.upload_dir.clone())),
    ));

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            // Application state (photo store and config)
            .app_data(store.clone())
            .app_data(config_data.clone())
            // Middleware
            .wrap(cors(&config_data))
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::photos_config)
            .configure(handlers::comments_config)
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {}", server_addr))?
    .run()
    .await?;

    Ok(())
}

/// CORS policy from CORS_ALLOWED_ORIGIN ("*" allows any origin)
fn cors(config: &Config) -> Cors {
    let cors = if config.cors_allowed_origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(&config.cors_allowed_origin)
    };

    cors.allow_any_method().allow_any_header().max_age(3600)
}
