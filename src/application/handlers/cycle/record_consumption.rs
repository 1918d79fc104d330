//! RecordConsumptionHandler - Command handler for client acknowledgments.

use std::sync::Arc;

use tracing::debug;

use crate::domain::cycle::{ConsumptionRecord, CycleError};
use crate::domain::foundation::Timestamp;
use crate::ports::CursorStore;

/// Command acknowledging that the article at `index` was shown.
#[derive(Debug, Clone)]
pub struct RecordConsumptionCommand {
    pub index: i64,
}

/// Handler for recording consumption.
///
/// Acknowledging never moves the cursor; repeating an acknowledgment only
/// refreshes its timestamp.
pub struct RecordConsumptionHandler {
    store: Arc<dyn CursorStore>,
}

impl RecordConsumptionHandler {
    pub fn new(store: Arc<dyn CursorStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: RecordConsumptionCommand,
    ) -> Result<ConsumptionRecord, CycleError> {
        if cmd.index < 0 {
            return Err(CycleError::validation(
                "index",
                "must be a non-negative integer",
            ));
        }

        let record = ConsumptionRecord::new(cmd.index, Timestamp::now());
        self.store.save_consumption(&record).await?;
        debug!(index = cmd.index, "Recorded consumption");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cursor_store::InMemoryCursorStore;

    #[tokio::test]
    async fn stores_acknowledged_index() {
        let store = Arc::new(InMemoryCursorStore::new());
        let handler = RecordConsumptionHandler::new(store.clone());

        handler
            .handle(RecordConsumptionCommand { index: 3 })
            .await
            .unwrap();

        let stored = store.load_consumption().await.unwrap().unwrap();
        assert_eq!(stored.last_consumed_index, 3);
    }

    #[tokio::test]
    async fn repeated_acknowledgment_is_idempotent() {
        let store = Arc::new(InMemoryCursorStore::new());
        let handler = RecordConsumptionHandler::new(store.clone());

        handler.handle(RecordConsumptionCommand { index: 1 }).await.unwrap();
        handler.handle(RecordConsumptionCommand { index: 1 }).await.unwrap();

        assert!(store.load_consumption().await.unwrap().unwrap().releases(1));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn negative_index_is_rejected() {
        let store = Arc::new(InMemoryCursorStore::new());
        let handler = RecordConsumptionHandler::new(store.clone());

        let result = handler.handle(RecordConsumptionCommand { index: -1 }).await;

        assert!(matches!(result, Err(CycleError::ValidationFailed { .. })));
        assert!(store.load_consumption().await.unwrap().is_none());
    }
}
