//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, backoff, errors)
//! - `article` - The publishable news item and its validity filter
//! - `cycle` - Cursor state machine and first-sight stamping
//! - `feed` - The sync client's deduplicated, ordered view of a cycle

pub mod article;
pub mod cycle;
pub mod feed;
pub mod foundation;
