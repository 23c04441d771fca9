//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - Static question and healing-task catalogs
//! - `session` - Session aggregate and lifecycle
//! - `scoring` - Pure couple/solo analysis functions
//! - `progress` - Streak and milestone arithmetic
//! - `credentials` - Password digests and verification codes

pub mod catalog;
pub mod credentials;
pub mod foundation;
pub mod progress;
pub mod scoring;
pub mod session;
