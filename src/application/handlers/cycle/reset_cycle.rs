//! ResetCycleHandler - Command handler that rewinds the wire.

use std::sync::Arc;

use tracing::info;

use crate::domain::cycle::{CycleError, CycleRecord};
use crate::domain::foundation::Timestamp;
use crate::ports::CursorStore;

/// Command to clear cursor, article map, and acknowledgment.
#[derive(Debug, Clone, Default)]
pub struct ResetCycleCommand;

/// Handler for resetting the cycle.
///
/// The fresh record is written unconditionally so a reset always wins over
/// an in-flight advance.
pub struct ResetCycleHandler {
    store: Arc<dyn CursorStore>,
}

impl ResetCycleHandler {
    pub fn new(store: Arc<dyn CursorStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _cmd: ResetCycleCommand) -> Result<CycleRecord, CycleError> {
        let record = CycleRecord::fresh(Timestamp::now());
        self.store.put(&record).await?;
        self.store.clear_consumption().await?;
        info!("Cycle state reset");
        Ok(record)
    }
}
