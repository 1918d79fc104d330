//! Route configuration for the news wire endpoints.
//!
//! Configures Axum router with the wire routes, CORS, and request tracing.

use axum::error_handling::HandleErrorLayer;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::adapters::http::middleware::cors_middleware;
use super::handlers::{
    advance_cycle, get_current_article, get_cycle_articles, handle_layer_error, health,
    not_found, record_consumption, reset_cycle, wire_root, CycleAppState,
};

/// Creates the wire router with all endpoints.
///
/// Routes:
/// - `GET /` - Advance (cycling mode) or list articles (simple mode)
/// - `GET /current` - Current article without advancing
/// - `GET /cycle-articles` - Active cycle's articles, newest first
/// - `POST /cycle` - Advance exactly one step
/// - `POST /consumed` - Acknowledge an index
/// - `POST /reset` - Clear cycle state
/// - `GET /health` - Liveness probe
///
/// A known path hit with the wrong method answers 404 like an unknown path.
pub fn cycle_router() -> Router<CycleAppState> {
    Router::new()
        .route("/", get(wire_root).fallback(not_found))
        .route("/current", get(get_current_article).fallback(not_found))
        .route("/cycle-articles", get(get_cycle_articles).fallback(not_found))
        .route("/cycle", post(advance_cycle).fallback(not_found))
        .route("/consumed", post(record_consumption).fallback(not_found))
        .route("/reset", post(reset_cycle).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
        .fallback(not_found)
}

/// Builds the complete service: routes, state, timeout, CORS, and tracing.
///
/// The timeout sits inside the CORS layer so a 408 still carries the headers,
/// and its error is rendered as a JSON `{error}` body.
pub fn app_router(state: CycleAppState) -> Router {
    let timeout = state.request_timeout;
    cycle_router()
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
}
