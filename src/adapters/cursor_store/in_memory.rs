//! In-memory cursor store for testing and development.
//!
//! Versions behave exactly like the Redis adapter's so conflict handling can
//! be exercised without a server.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle::{ConsumptionRecord, CycleRecord};
use crate::ports::{CursorStore, StoreError, Versioned};

#[derive(Debug, Default)]
struct Slots {
    cycle: Option<Versioned<CycleRecord>>,
    consumption: Option<ConsumptionRecord>,
}

/// Cursor store holding both records behind one lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCursorStore {
    slots: Arc<RwLock<Slots>>,
}

impl InMemoryCursorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CursorStore for InMemoryCursorStore {
    async fn load(&self) -> Result<Option<Versioned<CycleRecord>>, StoreError> {
        Ok(self.slots.read().await.cycle.clone())
    }

    async fn insert(&self, record: &CycleRecord) -> Result<u64, StoreError> {
        let mut slots = self.slots.write().await;
        if slots.cycle.is_some() {
            return Err(StoreError::AlreadyExists);
        }
        slots.cycle = Some(Versioned::new(1, record.clone()));
        Ok(1)
    }

    async fn compare_and_swap(
        &self,
        expected: u64,
        record: &CycleRecord,
    ) -> Result<u64, StoreError> {
        let mut slots = self.slots.write().await;
        let stored = slots.cycle.as_mut().ok_or(StoreError::NotFound)?;
        if stored.version != expected {
            return Err(StoreError::Conflict);
        }
        stored.version += 1;
        stored.value = record.clone();
        Ok(stored.version)
    }

    async fn put(&self, record: &CycleRecord) -> Result<u64, StoreError> {
        let mut slots = self.slots.write().await;
        let version = slots.cycle.as_ref().map_or(1, |stored| stored.version + 1);
        slots.cycle = Some(Versioned::new(version, record.clone()));
        Ok(version)
    }

    async fn load_consumption(&self) -> Result<Option<ConsumptionRecord>, StoreError> {
        Ok(self.slots.read().await.consumption.clone())
    }

    async fn save_consumption(&self, record: &ConsumptionRecord) -> Result<(), StoreError> {
        self.slots.write().await.consumption = Some(record.clone());
        Ok(())
    }

    async fn clear_consumption(&self) -> Result<(), StoreError> {
        self.slots.write().await.consumption = None;
        Ok(())
    }
}
