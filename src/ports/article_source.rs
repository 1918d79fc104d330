//! Article source port - the backing store of candidate articles.
//!
//! A source returns raw items exactly as stored. Filtering to publishable
//! articles happens in the application layer so every adapter gets the same
//! validity rules.

use async_trait::async_trait;
use serde_json::Value;

/// Port for reading the full candidate set.
///
/// Order matters: the cycling engine addresses articles by their position
/// in the returned list.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Returns every stored item, unfiltered.
    async fn fetch_all(&self) -> Result<Vec<Value>, SourceError>;
}

/// Errors from article source operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Backing store could not be reached or read.
    #[error("article source unavailable: {0}")]
    Unavailable(String),

    /// Stored data is not a list of items.
    #[error("malformed article data: {0}")]
    Malformed(String),
}
