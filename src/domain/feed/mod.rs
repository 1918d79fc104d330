//! Feed module - the client's local view of the active cycle.

mod cache;
mod update;

pub use cache::{FeedCache, FeedOrder, MergeOutcome};
pub use update::{FeedMetadata, FeedUpdate};
