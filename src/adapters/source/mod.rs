//! Article source adapters.
//!
//! ## Available Adapters
//!
//! - `JsonFileSource` - Reads the candidate set from a JSON file
//! - `InMemorySource` - Holds items in memory for tests and demos

mod in_memory;
mod json_file;

pub use in_memory::InMemorySource;
pub use json_file::JsonFileSource;
