//! Cycle API port - the sync client's view of the cycling engine.
//!
//! Engine responses come in several shapes depending on the endpoint and the
//! deployment (direct JSON, a serialized response envelope, or a raw item
//! scan). [`CyclePayload::normalize`] folds all of them into one type.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::domain::article::{publishable, Article};
use crate::domain::cycle::CycleMetadata;

/// Port for talking to the cycling engine.
#[async_trait]
pub trait CycleApi: Send + Sync {
    /// Advances the cursor and returns the newly current article.
    async fn advance(&self) -> Result<CyclePayload, ApiError>;

    /// Returns the active cycle's accumulated articles without advancing.
    async fn cycle_articles(&self) -> Result<CyclePayload, ApiError>;

    /// Acknowledges that the article at `index` was shown.
    async fn acknowledge(&self, index: usize) -> Result<(), ApiError>;

    /// Clears the engine's cycle state.
    async fn reset(&self) -> Result<(), ApiError>;
}

/// Errors from engine calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The engine answered with a non-success status.
    #[error("engine returned status {status}")]
    Status { status: u16 },

    /// The response body was not JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Normalized engine response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CyclePayload {
    /// The article the engine marked current, if the response named one.
    pub article: Option<Article>,
    /// Accompanying articles: the cycle snapshot or a plain list.
    pub articles: Vec<Article>,
    pub metadata: Option<CycleMetadata>,
}

impl CyclePayload {
    /// True when the response carried no articles at all.
    pub fn is_empty(&self) -> bool {
        self.article.is_none() && self.articles.is_empty()
    }

    /// Folds any known response shape into a payload.
    ///
    /// Accepted shapes:
    /// - `{article, metadata, cycleArticles}` from an advance
    /// - `{cycleArticles, metadata}` from a snapshot read
    /// - a bare array, `{Items: [...]}` or `{articles: [...]}` item list
    /// - a response envelope whose `body` is either of the above, possibly
    ///   encoded as a JSON string
    ///
    /// Anything else is treated as empty.
    pub fn normalize(value: Value) -> Self {
        Self::normalize_depth(value, 2)
    }

    fn normalize_depth(value: Value, depth: u8) -> Self {
        match value {
            Value::Array(items) => Self::from_items(items),
            Value::Object(mut map) => {
                if let Some(body) = map.remove("body") {
                    if depth == 0 {
                        return Self::default();
                    }
                    return match body {
                        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
                            Ok(inner) => Self::normalize_depth(inner, depth - 1),
                            Err(e) => {
                                warn!(error = %e, "Dropping envelope with undecodable body");
                                Self::default()
                            }
                        },
                        inner => Self::normalize_depth(inner, depth - 1),
                    };
                }

                let metadata = map
                    .remove("metadata")
                    .and_then(|m| serde_json::from_value::<CycleMetadata>(m).ok());
                let article = map
                    .remove("article")
                    .and_then(|a| publishable(std::iter::once(a)).into_iter().next());
                let articles = ["cycleArticles", "Items", "articles"]
                    .iter()
                    .find_map(|key| match map.remove(*key) {
                        Some(Value::Array(items)) => Some(publishable(items)),
                        _ => None,
                    })
                    .unwrap_or_default();

                Self {
                    article,
                    articles,
                    metadata,
                }
            }
            _ => Self::default(),
        }
    }

    fn from_items(items: Vec<Value>) -> Self {
        Self {
            article: None,
            articles: publishable(items),
            metadata: None,
        }
    }
}
