//! Streak arithmetic and milestone thresholds.
//!
//! Streaks count consecutive calendar days with at least one completed task.
//! Granularity is the calendar day, not elapsed hours: finishing a task at
//! 23:59 and another at 00:01 the next day counts as two days.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// A named streak-length achievement. Once earned, permanently retained,
/// even if the streak later resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Milestone {
    #[serde(rename = "3_days")]
    ThreeDays,
    #[serde(rename = "7_days")]
    SevenDays,
    #[serde(rename = "14_days")]
    FourteenDays,
    #[serde(rename = "30_days")]
    ThirtyDays,
    #[serde(rename = "60_days")]
    SixtyDays,
    #[serde(rename = "90_days")]
    NinetyDays,
}

impl Milestone {
    /// All milestones, ascending by threshold.
    pub const ALL: [Milestone; 6] = [
        Milestone::ThreeDays,
        Milestone::SevenDays,
        Milestone::FourteenDays,
        Milestone::ThirtyDays,
        Milestone::SixtyDays,
        Milestone::NinetyDays,
    ];

    /// Streak length in days required to earn this milestone.
    pub fn threshold_days(&self) -> u32 {
        match self {
            Milestone::ThreeDays => 3,
            Milestone::SevenDays => 7,
            Milestone::FourteenDays => 14,
            Milestone::ThirtyDays => 30,
            Milestone::SixtyDays => 60,
            Milestone::NinetyDays => 90,
        }
    }

    /// Stable identifier, as persisted.
    pub fn id(&self) -> &'static str {
        match self {
            Milestone::ThreeDays => "3_days",
            Milestone::SevenDays => "7_days",
            Milestone::FourteenDays => "14_days",
            Milestone::ThirtyDays => "30_days",
            Milestone::SixtyDays => "60_days",
            Milestone::NinetyDays => "90_days",
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Result of advancing a streak for a new completion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    /// The streak after the completion.
    pub streak: u32,
    /// The longest streak after the completion.
    pub longest_streak: u32,
}

/// Advances the streak for a task completed at `now`.
///
/// - Same calendar day as the last activity: unchanged.
/// - Last activity was yesterday: streak grows by one.
/// - No prior activity: streak starts at 1 (and so does the longest).
/// - Gap of two or more days: streak resets to 1, never to 0 - the completing
///   action itself is day one of the new streak.
pub fn next_streak(
    last_activity: Option<&Timestamp>,
    now: &Timestamp,
    streak: u32,
    longest_streak: u32,
) -> StreakUpdate {
    match last_activity {
        Some(last) => match now.days_since(last) {
            0 => StreakUpdate {
                streak,
                longest_streak,
            },
            1 => {
                let grown = streak + 1;
                StreakUpdate {
                    streak: grown,
                    longest_streak: longest_streak.max(grown),
                }
            }
            _ => StreakUpdate {
                streak: 1,
                longest_streak: longest_streak.max(1),
            },
        },
        None => StreakUpdate {
            streak: 1,
            longest_streak: longest_streak.max(1),
        },
    }
}

/// Returns the milestones newly reached by `streak`, excluding any already
/// earned. Checked against the current streak, not the lifetime task count.
pub fn milestones_reached(streak: u32, already_earned: &[Milestone]) -> Vec<Milestone> {
    Milestone::ALL
        .into_iter()
        .filter(|m| streak >= m.threshold_days() && !already_earned.contains(m))
        .collect()
}

/// Read-only staleness check for display purposes.
///
/// Returns 0 when more than one full calendar day has passed since the last
/// activity - the streak is broken even though the stored field has not been
/// rewritten yet. The next completion event recomputes the stored value.
pub fn effective_streak(streak: u32, last_activity: Option<&Timestamp>, now: &Timestamp) -> u32 {
    match last_activity {
        Some(last) if now.days_since(last) > 1 => 0,
        Some(_) => streak,
        None => 0,
    }
}
