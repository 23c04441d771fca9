//! Storage adapters for the key-value port.

mod in_memory;

pub use in_memory::InMemoryStore;
