pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod http;
pub mod middleware;
pub mod models;
pub mod state;

use std::{net::SocketAddr, num::NonZeroU32, sync::Arc};

use axum::{Json, Router, http::StatusCode, middleware as axum_middleware};
use config::{Config, StoreBackend};
use db::{MemoryReviewStore, RedisReviewStore};
use errors::{AppError, ErrorBody};
use middleware::{cors_layer, create_rate_limiter, rate_limit_middleware};
use state::{AppState, ReviewStoreHandle};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn create_app(state: AppState, config: &Config) -> Router {
    let per_minute = NonZeroU32::new(config.rate_limit_per_minute).unwrap_or(NonZeroU32::MIN);
    let rate_limiter = create_rate_limiter(per_minute);

    Router::new()
        .merge(http::create_http_routes(state))
        .fallback(not_found)
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(rate_limiter.clone(), req, next)
        }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.allowed_origins)),
        )
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    AppError::NotFound("Route not found".into()).to_response()
}

pub async fn connect_store(backend: &StoreBackend) -> Result<ReviewStoreHandle, AppError> {
    match backend {
        StoreBackend::Redis { url } => Ok(Arc::new(RedisReviewStore::connect(url).await?)),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory review store, reviews will not survive a restart");
            Ok(Arc::new(MemoryReviewStore::new()))
        }
    }
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let store = connect_store(&config.store).await?;

    let app = create_app(AppState::new(store.clone()), &config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(
        "Movie review server running at http://0.0.0.0:{}{}",
        config.port,
        http::routes::API_PREFIX
    );

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    store.close().await;
    served.map_err(AppError::Io)
}

pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
