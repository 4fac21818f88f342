//! Student Insight Server
//!
//! Interprets classifier output for student pass/fail predictions and lets
//! users explore what-if scenarios.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     STUDENT INSIGHT                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌──────────────────────┐ │
//! │  │  API      │  │  Insight     │  │  What-If Sessions    │ │
//! │  │  (Axum)   │  │  drivers,    │  │  + Report Composer   │ │
//! │  │           │  │  rules       │  │                      │ │
//! │  └─────┬─────┘  └──────────────┘  └──────────┬───────────┘ │
//! │        └─────────────────┬────────────────────┘             │
//! │                          ▼                                  │
//! │              ┌──────────────────────┐                      │
//! │              │ Classification svc   │                      │
//! │              └──────────────────────┘                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod models;
mod predictor;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::LogFormat;
use logic::whatif::SessionStore;
use predictor::{HttpPredictor, Predictor};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    init_tracing(config.log_format);

    tracing::info!("Student Insight Server starting...");
    tracing::info!("Classification service: {}", config.predictor_url);
    tracing::info!("Session idle TTL: {} min", config.session_ttl_minutes);
    if config.is_production() && config.predictor_token.is_none() {
        tracing::warn!("PREDICTOR_TOKEN not set in production");
    }

    let predictor = HttpPredictor::new(config.predictor_config())
        .context("Failed to build classification service client")?;

    // Build application state
    let state = AppState {
        config: config.clone(),
        predictor: Arc::new(predictor),
        sessions: SessionStore::with_ttl(config.session_ttl()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "student_insight=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub predictor: Arc<dyn Predictor>,
    pub sessions: SessionStore,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Stateless interpretation
    let insight_routes = Router::new()
        .route("/api/v1/drivers/rank", post(handlers::insights::rank))
        .route("/api/v1/models/:model_id/drivers", get(handlers::insights::model_drivers))
        .route("/api/v1/recommendations", post(handlers::insights::recommendations))
        .route("/api/v1/feedback", post(handlers::feedback::submit));

    // Predictions and what-if sessions
    let session_routes = Router::new()
        .route("/api/v1/predictions", post(handlers::predictions::create))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::sessions::get).delete(handlers::sessions::close),
        )
        .route("/api/v1/sessions/:id/fields/:name", put(handlers::sessions::set_field))
        .route("/api/v1/sessions/:id/recalculate", post(handlers::sessions::recalculate))
        .route("/api/v1/sessions/:id/reset", post(handlers::sessions::reset))
        .route("/api/v1/sessions/:id/report", get(handlers::reports::session_report));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(insight_routes)
        .merge(session_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
