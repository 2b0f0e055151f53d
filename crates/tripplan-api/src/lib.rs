//! tripplan API: HTTP boundary around the suggestion decoder
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod upstream;

use axum::{routing::get, Router};
use config::Config;
use metrics::Metrics;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use upstream::UpstreamClient;

/// Shared per-process state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: UpstreamClient,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(&config)?;
        let metrics = Metrics::new()?;
        Ok(Self {
            config: Arc::new(config),
            upstream,
            metrics,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            handlers::GENERATE_PATH,
            get(handlers::health)
                .post(handlers::generate)
                .fallback(handlers::method_not_allowed),
        )
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = config.addr;
    if !config.has_api_key() {
        tracing::warn!("OPENAI_API_KEY is not set; generation requests will fail");
    }

    let app = create_app(AppState::new(config)?);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("tripplan API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
