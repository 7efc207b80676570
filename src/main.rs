use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use carebook::config::AppConfig;
use carebook::routes;
use carebook::services::ai::gemini::GeminiProvider;
use carebook::services::calendly::availability::CalendlyAvailability;
use carebook::services::calendly::booking::CalendlyBooking;
use carebook::services::calendly::cache::CachedAvailability;
use carebook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    anyhow::ensure!(!config.google_api_key.is_empty(), "GOOGLE_API_KEY must be set");
    anyhow::ensure!(!config.calendly_api_key.is_empty(), "CALENDLY_API_KEY must be set");

    tracing::info!("using Gemini model {}", config.gemini_model);
    let llm = GeminiProvider::new(config.google_api_key.clone(), config.gemini_model.clone());

    let availability = CalendlyAvailability::new(
        config.calendly_api_key.clone(),
        config.calendly_base_url.clone(),
        Duration::from_secs(config.availability_timeout_secs),
    )?;
    let availability =
        CachedAvailability::new(Box::new(availability), config.availability_cache_size);
    let booking = CalendlyBooking::new(
        config.calendly_api_key.clone(),
        config.calendly_base_url.clone(),
    );

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let port = config.port;
    let state = Arc::new(AppState::new(
        config,
        Box::new(llm),
        Box::new(availability),
        Box::new(booking),
    ));

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("starting medical scheduling agent on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
