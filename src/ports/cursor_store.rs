//! Cursor store port - keyed small-record storage for the cycling engine.
//!
//! Holds two records: the [`CycleRecord`] (cursor plus article map) and the
//! [`ConsumptionRecord`]. The cycle record is written with optimistic
//! concurrency: every stored value carries a version, and writes name the
//! version they were computed from.

use async_trait::async_trait;

use crate::domain::cycle::{ConsumptionRecord, CycleRecord};

/// A stored value together with its store version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

impl<T> Versioned<T> {
    pub fn new(version: u64, value: T) -> Self {
        Self { version, value }
    }
}

/// Port for cursor persistence.
///
/// Implementations must make `insert` and `compare_and_swap` atomic with
/// respect to each other.
#[async_trait]
pub trait CursorStore: Send + Sync {
    /// Loads the cycle record, `None` if it was never written.
    async fn load(&self) -> Result<Option<Versioned<CycleRecord>>, StoreError>;

    /// Creates the cycle record.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if another writer created it first
    async fn insert(&self, record: &CycleRecord) -> Result<u64, StoreError>;

    /// Replaces the cycle record if its version is still `expected`.
    ///
    /// Returns the new version.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the stored version moved on
    /// - `NotFound` if the record is gone
    async fn compare_and_swap(&self, expected: u64, record: &CycleRecord)
        -> Result<u64, StoreError>;

    /// Writes the cycle record unconditionally.
    async fn put(&self, record: &CycleRecord) -> Result<u64, StoreError>;

    /// Loads the last acknowledgment, `None` if nothing was acknowledged.
    async fn load_consumption(&self) -> Result<Option<ConsumptionRecord>, StoreError>;

    /// Overwrites the acknowledgment record.
    async fn save_consumption(&self, record: &ConsumptionRecord) -> Result<(), StoreError>;

    /// Deletes the acknowledgment record.
    async fn clear_consumption(&self) -> Result<(), StoreError>;
}

/// Errors from cursor store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    AlreadyExists,

    #[error("record version changed concurrently")]
    Conflict,

    #[error("record not found")]
    NotFound,

    #[error("cursor store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to (de)serialize record: {0}")]
    Serialization(String),
}

impl StoreError {
    /// True for errors caused by a concurrent writer.
    pub fn is_race(&self) -> bool {
        matches!(
            self,
            StoreError::AlreadyExists | StoreError::Conflict | StoreError::NotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn races_are_distinguished_from_outages() {
        assert!(StoreError::AlreadyExists.is_race());
        assert!(StoreError::Conflict.is_race());
        assert!(StoreError::NotFound.is_race());
        assert!(!StoreError::Unavailable("down".to_string()).is_race());
        assert!(!StoreError::Serialization("bad".to_string()).is_race());
    }
}
