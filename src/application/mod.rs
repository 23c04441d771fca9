//! Application services. Each service wraps the key-value store port and
//! orchestrates one slice of the domain: session lifecycle, healing-task
//! progress, and account recovery.

pub mod accounts;
pub mod progress;
pub mod repository;
pub mod sessions;

pub use accounts::AccountService;
pub use progress::{ProgressService, ProgressSummary, TaskCompletionOutcome};
pub use sessions::{CreateSessionRequest, RecordAnswerOutcome, SessionService};
