//! Cycle article map - first-sight publish stamps per cycle.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::article::PublishStamp;
use crate::domain::foundation::{ArticleId, Timestamp};

/// Publish stamps keyed by cycle number, then by article id.
///
/// A stamp is written the first time a cycle reaches an article and is never
/// replaced afterwards; later visits within the same cycle read it back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleArticleMap(BTreeMap<u64, HashMap<ArticleId, PublishStamp>>);

impl CycleArticleMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stamp for `id` in `cycle`, creating it at `now` on first sight.
    pub fn first_sight(
        &mut self,
        cycle: u64,
        id: &ArticleId,
        now: Timestamp,
        cycle_index: usize,
    ) -> PublishStamp {
        self.0
            .entry(cycle)
            .or_default()
            .entry(id.clone())
            .or_insert_with(|| PublishStamp::new(now, cycle_index))
            .clone()
    }

    /// Looks up the stamp of `id` in `cycle`.
    pub fn stamp(&self, cycle: u64, id: &ArticleId) -> Option<&PublishStamp> {
        self.0.get(&cycle).and_then(|stamps| stamps.get(id))
    }

    /// All stamps recorded for `cycle`.
    pub fn cycle(&self, cycle: u64) -> Option<&HashMap<ArticleId, PublishStamp>> {
        self.0.get(&cycle)
    }

    /// Number of cycles with at least one stamp.
    pub fn cycle_count(&self) -> usize {
        self.0.len()
    }

    /// Drops every cycle older than the `retained` most recent ones, counted
    /// back from `active`.
    pub fn retain_recent(&mut self, active: u64, retained: u64) {
        let oldest_kept = active.saturating_sub(retained.saturating_sub(1));
        self.0.retain(|cycle, _| *cycle >= oldest_kept);
    }

    /// Removes every stamp.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// True when no cycle has any stamp.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
