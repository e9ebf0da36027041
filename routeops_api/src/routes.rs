use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::{config::Config, health::health_handler, solve::solve_handler, state::AppState};

/// Credentials rule out wildcards, methods and headers mirror the preflight.
pub fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_origins.clone()))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn app(state: Arc<AppState>, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/solve", post(solve_handler))
        .layer(ServiceBuilder::new().layer(cors_layer(config)))
        .with_state(state)
}
