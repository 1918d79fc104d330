//! Cursor store adapters.
//!
//! ## Available Adapters
//!
//! - `InMemoryCursorStore` - In-process store for tests and single-server runs
//! - `RedisCursorStore` - Redis-backed store shared by every engine instance

mod in_memory;
mod redis;

pub use in_memory::InMemoryCursorStore;
pub use self::redis::RedisCursorStore;
