//! HTTP adapter for the news wire endpoints.
//!
//! Exposes the cycling engine as a small JSON API with permissive CORS.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ConsumedRequest, ConsumedResponse, CurrentArticleResponse, CycleArticlesResponse,
    ErrorResponse, HealthResponse, NoArticlesResponse, ResetResponse,
};
pub use handlers::{CycleApiError, CycleAppState};
pub use routes::{app_router, cycle_router};
