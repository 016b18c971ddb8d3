pub mod agent;
pub mod asr;
pub mod config;
pub mod error;
pub mod routes;
pub mod scripts;
pub mod state;
pub mod telemetry;
pub mod utils;
pub mod vad;
pub mod voice;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Full application router with middleware, ready to serve
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
