//! Sync client - keeps a local, deduplicated feed in step with the engine.

mod client;
mod subscription;

pub use client::{SyncClient, SyncClientConfig};
pub use subscription::Subscription;
