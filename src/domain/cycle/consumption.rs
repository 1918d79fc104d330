//! Consumption record - the last index a client acknowledged.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Client acknowledgment that the article at `last_consumed_index` was shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRecord {
    pub last_consumed_index: i64,
    pub timestamp: Timestamp,
}

impl ConsumptionRecord {
    /// Records consumption of `index` at `now`.
    pub fn new(index: i64, now: Timestamp) -> Self {
        Self {
            last_consumed_index: index,
            timestamp: now,
        }
    }

    /// True when this acknowledgment releases the cursor parked at `index`.
    pub fn releases(&self, index: i64) -> bool {
        self.last_consumed_index == index
    }
}
