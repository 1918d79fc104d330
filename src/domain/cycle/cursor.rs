//! Cursor state - the persisted pointer to the currently published article.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Index value of a cursor that has never published anything.
pub const FRESH_INDEX: i64 = -1;

/// Position of the cursor within the candidate set.
///
/// `current_index` is `-1` until the first advance, then always
/// `0 <= current_index < article_count` as of the last write.
/// `cycle_count` only ever grows, and grows by exactly one per wraparound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorState {
    pub current_index: i64,
    pub cycle_count: u64,
    pub last_updated: Timestamp,
}

/// Outcome of moving the cursor one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub wrapped: bool,
}

impl CursorState {
    /// A cursor that has not published anything yet.
    pub fn fresh(now: Timestamp) -> Self {
        Self {
            current_index: FRESH_INDEX,
            cycle_count: 0,
            last_updated: now,
        }
    }

    /// The published position, or `None` for a fresh cursor.
    pub fn position(&self) -> Option<usize> {
        usize::try_from(self.current_index).ok()
    }

    /// Computes the next position in a candidate set of `article_count` items.
    ///
    /// A positioned cursor wraps when the following slot would fall off the
    /// end of the set. This also covers a single-article set and a set that
    /// shrank below the stored index.
    pub fn next_step(&self, article_count: usize) -> Step {
        debug_assert!(article_count > 0, "next_step on empty candidate set");
        match self.position() {
            None => Step {
                index: 0,
                wrapped: false,
            },
            Some(current) if current + 1 >= article_count => Step {
                index: 0,
                wrapped: true,
            },
            Some(current) => Step {
                index: current + 1,
                wrapped: false,
            },
        }
    }

    /// Moves the cursor to `step`, bumping the cycle counter on wraparound.
    pub fn apply(&mut self, step: Step, now: Timestamp) {
        if step.wrapped {
            self.cycle_count += 1;
        }
        self.current_index = step.index as i64;
        self.last_updated = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_millis(1_000)
    }

    #[test]
    fn fresh_cursor_has_no_position() {
        let cursor = CursorState::fresh(now());
        assert_eq!(cursor.current_index, -1);
        assert_eq!(cursor.position(), None);
        assert_eq!(cursor.cycle_count, 0);
    }

    #[test]
    fn fresh_cursor_starts_at_zero_without_wrapping() {
        let step = CursorState::fresh(now()).next_step(3);
        assert_eq!(step, Step { index: 0, wrapped: false });
    }

    #[test]
    fn last_position_wraps_to_zero() {
        let mut cursor = CursorState::fresh(now());
        cursor.current_index = 2;

        let step = cursor.next_step(3);
        assert_eq!(step, Step { index: 0, wrapped: true });

        cursor.apply(step, Timestamp::from_millis(2_000));
        assert_eq!(cursor.current_index, 0);
        assert_eq!(cursor.cycle_count, 1);
        assert_eq!(cursor.last_updated, Timestamp::from_millis(2_000));
    }

    #[test]
    fn single_article_set_wraps_every_step_after_the_first() {
        let mut cursor = CursorState::fresh(now());

        let first = cursor.next_step(1);
        assert!(!first.wrapped);
        cursor.apply(first, now());

        let second = cursor.next_step(1);
        assert!(second.wrapped);
        cursor.apply(second, now());
        assert_eq!(cursor.cycle_count, 1);
    }

    #[test]
    fn shrunken_candidate_set_restarts_cycle() {
        let mut cursor = CursorState::fresh(now());
        cursor.current_index = 7;

        assert_eq!(cursor.next_step(5), Step { index: 0, wrapped: true });
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_value(CursorState::fresh(now())).unwrap();
        assert_eq!(json["currentIndex"], -1);
        assert_eq!(json["cycleCount"], 0);
        assert_eq!(json["lastUpdated"], 1_000);
    }
}
