//! HTTP adapters - REST API implementations.
//!
//! - `cycle` - The news wire endpoints
//! - `middleware` - Cross-cutting layers (CORS)

pub mod cycle;
pub mod middleware;

// Re-export key types for convenience
pub use cycle::{app_router, cycle_router, CycleAppState};
