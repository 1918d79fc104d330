//! HTTP middleware.
//!
//! - `cors` - Permissive CORS headers and preflight handling

pub mod cors;

pub use cors::{apply_cors_headers, cors_middleware, CORS_HEADERS};
