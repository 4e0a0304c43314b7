//! Newsletter adapters.

mod in_memory_sink;

pub use in_memory_sink::InMemorySubscriptionSink;
