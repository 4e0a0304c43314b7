//! Storage Adapters
//!
//! Implementations of the `KeyValueStore` port.
//!
//! - **FileKeyValueStore** - One JSON object on disk
//! - **InMemoryKeyValueStore** - Process memory (testing/development)

mod file_key_value_store;
mod in_memory_key_value_store;

pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;
