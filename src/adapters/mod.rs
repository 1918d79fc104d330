//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `source` - Article sources (JSON file, in-memory)
//! - `cursor_store` - Cursor persistence (in-memory, Redis)
//! - `http` - The engine's REST API (axum)
//! - `wire` - The sync client's engine connection (reqwest)

pub mod cursor_store;
pub mod http;
pub mod source;
pub mod wire;

pub use cursor_store::{InMemoryCursorStore, RedisCursorStore};
pub use self::http::{app_router, CycleAppState};
pub use source::{InMemorySource, JsonFileSource};
pub use wire::{HttpCycleApi, HttpCycleApiConfig};
