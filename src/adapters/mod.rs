//! Adapters - concrete implementations of the ports.

pub mod storage;

pub use storage::InMemoryStore;
