//! Rekindle - relationship assessment and reconnection engine.
//!
//! A couple (or one partner solo) works through a fixed 30-question
//! assessment, gets a compatibility analysis, and then follows a catalog of
//! healing tasks that feed a daily streak with milestone awards. Everything
//! persists as JSON values in a pluggable key-value store.
//!
//! # Architecture
//!
//! - [`domain`] - catalogs, the session aggregate, scoring, streaks, and
//!   credential helpers; pure logic with no I/O
//! - [`ports`] - the key-value store trait the services depend on
//! - [`adapters`] - concrete store implementations
//! - [`application`] - services orchestrating domain operations over a store
//! - [`config`] - environment-driven settings
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rekindle::adapters::InMemoryStore;
//! use rekindle::application::{CreateSessionRequest, SessionService};
//! use rekindle::config::AppConfig;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryStore::new());
//! let sessions = SessionService::new(store, AppConfig::default());
//!
//! let session = sessions
//!     .create_couple(CreateSessionRequest {
//!         partner1_name: "Alex".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("share this code with your partner: {}", session.code());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
