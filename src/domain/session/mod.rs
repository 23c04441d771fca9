//! Session domain module.
//!
//! The session aggregate and its lifecycle: creation, partner join, answer
//! recording with undo, the mode-specific completion transition, task
//! progress, and the billing flags carried as inert metadata.

mod aggregate;
mod errors;

pub use aggregate::{
    Answer, Demographics, Gender, NewSession, Respondent, Session, SessionType, AGE_RANGE,
    SOLO_PARTNER_NAME,
};
pub use errors::SessionError;
