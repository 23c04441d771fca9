//! Progress tracking: day streaks and milestone achievements.
//!
//! Pure calendar-day arithmetic; the session aggregate applies the results.

mod streak;

pub use streak::{effective_streak, milestones_reached, next_streak, Milestone, StreakUpdate};
