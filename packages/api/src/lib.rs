use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use state::State;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, decompression::RequestDecompressionLayer,
};

pub mod error;
pub mod openapi;
mod routes;
pub mod state;

pub use axum;

pub fn construct_router(state: Arc<State>) -> Router {
    Router::new()
        .route("/", get(routes::health::health))
        .route("/health", get(routes::health::health))
        .route("/predict", post(routes::predict::predict))
        .route("/openapi.json", get(openapi::openapi_json))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            ServiceBuilder::new()
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new()),
        )
}
