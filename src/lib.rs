pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
mod http;
mod middleware;
pub mod models;
pub mod playlist;
pub mod ratings;
pub mod state;
pub mod stats;

use axum::{Router, http::StatusCode, middleware as axum_middleware};
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use middleware::{cors_layer, create_global_rate_limiter, rate_limit_middleware};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::{
    catalog::SpotifyCatalog, config::Config, db::RedisStore, errors::AppError, state::AppState,
};

/// All routes with request tracing and the 404 fallback, without network-facing layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(http::create_http_routes(state))
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let manager = RedisConnectionManager::new(config.redis_url.as_str())?;
    let redis_pool = Pool::builder().build(manager).await?;

    let state = AppState::new(
        Arc::new(RedisStore::new(redis_pool)),
        Arc::new(SpotifyCatalog::new(config.spotify.clone())),
        config.playlist_id.as_str(),
        config.jwt_secret.as_str(),
    );

    let global_rate_limiter = create_global_rate_limiter();

    let app = build_router(state)
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(cors_layer(&config.allowed_origins));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!("Playlist ratings server running on port {}", config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
