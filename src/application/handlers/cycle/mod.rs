//! Cycle command and query handlers.
//!
//! Handlers for the cycling engine: advancing the cursor, reading the
//! current article and cycle feed, recording acknowledgments, and reset.

mod common;
mod mode;

// Command handlers
mod advance_cycle;
mod record_consumption;
mod reset_cycle;

// Query handlers
mod get_current_article;
mod get_cycle_articles;
mod list_articles;

pub use advance_cycle::{
    AdvanceCycleCommand, AdvanceCycleConfig, AdvanceCycleHandler, AdvanceCycleResult,
};
pub use mode::EngineMode;
pub use record_consumption::{RecordConsumptionCommand, RecordConsumptionHandler};
pub use reset_cycle::{ResetCycleCommand, ResetCycleHandler};

// Query handlers
pub use get_current_article::{
    GetCurrentArticleHandler, GetCurrentArticleQuery, GetCurrentArticleResult,
};
pub use get_cycle_articles::{
    GetCycleArticlesHandler, GetCycleArticlesQuery, GetCycleArticlesResult,
};
pub use list_articles::{ListArticlesHandler, ListArticlesQuery};
