//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Engine Ports
//!
//! - `ArticleSource` - The backing store of candidate articles
//! - `CursorStore` - Versioned storage for the cycle and consumption records
//!
//! ## Client Ports
//!
//! - `CycleApi` - The sync client's connection to the cycling engine

mod article_source;
mod cursor_store;
mod cycle_api;

pub use article_source::{ArticleSource, SourceError};
pub use cursor_store::{CursorStore, StoreError, Versioned};
pub use cycle_api::{ApiError, CycleApi, CyclePayload};
