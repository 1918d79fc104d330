//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//! The `sync` module is the client-side counterpart that drives the engine
//! over its API port.

pub mod handlers;
pub mod sync;

pub use handlers::cycle::{
    AdvanceCycleCommand, AdvanceCycleConfig, AdvanceCycleHandler, AdvanceCycleResult, EngineMode,
    GetCurrentArticleHandler, GetCurrentArticleQuery, GetCurrentArticleResult,
    GetCycleArticlesHandler, GetCycleArticlesQuery, GetCycleArticlesResult, ListArticlesHandler,
    ListArticlesQuery, RecordConsumptionCommand, RecordConsumptionHandler, ResetCycleCommand,
    ResetCycleHandler,
};
pub use sync::{Subscription, SyncClient, SyncClientConfig};
