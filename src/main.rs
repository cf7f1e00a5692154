mod api;
mod config;
mod database;
mod middleware;
mod models;
mod seeds;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use config::{Config, StorageBackend};
use database::Store;
use dotenv::dotenv;
use state::AppState;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn build_cors(origins: &[String]) -> Cors {
    let cors = origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .supports_credentials()
        .max_age(3600)
}

async fn connect_store(config: &Config) -> std::io::Result<Arc<dyn Store>> {
    match config.storage {
        StorageBackend::Memory => {
            log::warn!("⚠️  Using in-memory storage, data is lost on restart");
            Ok(Arc::new(database::InMemoryStore::new()))
        }
        StorageBackend::MongoDB => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "DATABASE_URL must be set")
            })?;

            let db = database::MongoDB::new(url).await.map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to connect to MongoDB: {}", e),
                )
            })?;

            log::info!("✅ MongoDB connected successfully");
            Ok(Arc::new(db))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    log::info!("🚀 Starting Training Service...");

    let store = connect_store(&config).await?;

    // 🌱 Seed the default admin and the services document
    seeds::seed_admin_account(store.as_ref(), config.seed_admin.as_ref(), config.bcrypt_cost).await;
    seeds::seed_services_collection(store.as_ref()).await;

    let state = AppState::new(store, config.bcrypt_cost);
    let cors_origins = config.cors_origins.clone();

    if cors_origins.is_empty() {
        log::warn!("⚠️  CORS_ORIGINS is empty, browsers on other origins will be rejected");
    }

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();
        let state = state.clone();

        App::new()
            .wrap(build_cors(&cors_origins))
            .wrap(middleware::SecurityHeaders)
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(move |cfg| api::configure(cfg, state))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
