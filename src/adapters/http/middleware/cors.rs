//! Permissive CORS middleware for axum.
//!
//! Every response leaves with the same fixed header set, errors included,
//! and any `OPTIONS` request is answered directly with `200 {}` before
//! routing.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware};
//!
//! let app = Router::new()
//!     .route("/health", get(health))
//!     .layer(middleware::from_fn(cors_middleware));
//! ```

use axum::{
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Headers attached to every response.
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "*"),
    ("access-control-allow-headers", "*"),
    ("access-control-max-age", "86400"),
];

/// Answers preflight requests and decorates all other responses.
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        (StatusCode::OK, Json(json!({}))).into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut());
    response
}

/// Inserts the CORS headers and defaults the content type to JSON.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers
        .entry(CONTENT_TYPE)
        .or_insert(HeaderValue::from_static("application/json"));
}
