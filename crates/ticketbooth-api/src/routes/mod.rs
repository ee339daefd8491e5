//! Route modules and the top-level router.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod booking;
pub mod health;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    // TODO: restrict CORS to the booking front end origin once it has a fixed host.
    Router::new()
        .merge(health::router())
        .nest("/api/v1", booking::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
