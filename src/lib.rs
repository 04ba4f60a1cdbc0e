pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod mistral;
pub mod models;
pub mod prompt;
pub mod render;
pub mod routes;
pub mod util;

use axum::{Router, routing::{get, post}};
use tower_http::{catch_panic::CatchPanicLayer, cors::{Any, CorsLayer}, trace::TraceLayer};

use crate::error::panic_response;
use crate::routes::{generate_outfits, health_check, AppState};

/// The full HTTP application with its middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/outfits", post(generate_outfits))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
