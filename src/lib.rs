//! Mental health risk prediction service.
//!
//! Serves a pre-trained logistic-regression classifier over vectorized
//! survey features behind a small JSON API. The model artifact is produced
//! by the `train` binary and lazily loaded on the first prediction request.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod training;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub registry: model::ModelRegistry,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            config,
            registry: model::ModelRegistry::new(),
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
