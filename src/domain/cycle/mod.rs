//! Cycle module - the cursor state machine behind the news wire.
//!
//! A cycle is one full traversal of the candidate article set. The cursor
//! and the per-cycle first-sight stamps are persisted together as a
//! [`CycleRecord`]; client acknowledgments live in a separate
//! [`ConsumptionRecord`].

mod article_map;
mod consumption;
mod cursor;
mod errors;
mod record;
mod snapshot;

pub use article_map::CycleArticleMap;
pub use consumption::ConsumptionRecord;
pub use cursor::{CursorState, Step, FRESH_INDEX};
pub use errors::CycleError;
pub use record::CycleRecord;
pub use snapshot::{sort_newest_first, CycleMetadata, CycleSnapshot};
