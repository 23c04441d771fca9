//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the Rekindle domain.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{QuestionId, SessionCode, TaskId, CODE_LENGTH};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
