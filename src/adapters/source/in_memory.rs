//! In-memory article source for testing and development.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{ArticleSource, SourceError};

/// Article source backed by a shared vector.
///
/// Clones share storage, so a test can keep a handle and change the
/// candidate set while the engine is running.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    items: Arc<RwLock<Vec<Value>>>,
}

impl InMemorySource {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Replaces the whole candidate set.
    pub async fn replace(&self, items: Vec<Value>) {
        *self.items.write().await = items;
    }

    /// Appends one item.
    pub async fn push(&self, item: Value) {
        self.items.write().await.push(item);
    }
}

#[async_trait]
impl ArticleSource for InMemorySource {
    async fn fetch_all(&self) -> Result<Vec<Value>, SourceError> {
        Ok(self.items.read().await.clone())
    }
}
