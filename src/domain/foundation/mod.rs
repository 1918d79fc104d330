//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the news wire domain.

mod backoff;
mod errors;
mod ids;
mod timestamp;

pub use backoff::Backoff;
pub use errors::{ErrorCode, ValidationError};
pub use ids::ArticleId;
pub use timestamp::Timestamp;
