//! Ports - interfaces the application depends on.
//!
//! Adapters implement these traits; services hold them as `Arc<dyn _>`.

mod key_value_store;

pub use key_value_store::{KeyValueStore, StoreError};
