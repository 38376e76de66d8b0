mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::{Compress, Logger}, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::{DocumentStore, MongoStore};
use crate::services::auth_service::JwtKeys;
use crate::services::payment_service::{PaymentProcessor, StripeClient};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    log::info!("🚀 Starting Agency Server...");
    log::info!("📊 Database: {}", config.database_name);

    let store = MongoStore::connect(&config.database_url, &config.database_name)
        .await
        .map_err(std::io::Error::other)?;
    log::info!("✅ MongoDB connected successfully");

    let stripe = StripeClient::new(
        &config.stripe_api_base,
        &config.stripe_secret_key,
        &config.payment_currency,
    )
    .map_err(std::io::Error::other)?;

    let store_data: web::Data<dyn DocumentStore> =
        web::Data::from(Arc::new(store.clone()) as Arc<dyn DocumentStore>);
    let payments_data: web::Data<dyn PaymentProcessor> =
        web::Data::from(Arc::new(stripe) as Arc<dyn PaymentProcessor>);
    let keys_data = web::Data::new(JwtKeys::new(&config.token_secret, config.token_ttl_hours));

    let cors_origins = config.cors_origins.clone();

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    // Start HTTP server
    let server = HttpServer::new(move || {
        let cors = build_cors(&cors_origins);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(keys_data.clone())
            .app_data(payments_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    let result = server.await;

    log::info!("🛑 Server stopped, closing MongoDB connections");
    store.shutdown().await;

    result
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = if origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600)
}
