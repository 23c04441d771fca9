//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Computes `round(100 * numerator / denominator)` with half-away-from-zero
    /// rounding. A zero denominator yields zero percent.
    pub fn from_ratio(numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return Self::ZERO;
        }
        let pct = (f64::from(numerator) / f64::from(denominator) * 100.0).round();
        Self::new(pct as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(255).value(), 100);
    }

    #[test]
    fn from_ratio_rounds_to_nearest() {
        assert_eq!(Percentage::from_ratio(18, 30).value(), 60);
        assert_eq!(Percentage::from_ratio(10, 30).value(), 33);
        assert_eq!(Percentage::from_ratio(2, 3).value(), 67);
    }

    #[test]
    fn from_ratio_rounds_midpoints_up() {
        // 1/8 = 12.5%, 3/8 = 37.5%
        assert_eq!(Percentage::from_ratio(1, 8).value(), 13);
        assert_eq!(Percentage::from_ratio(3, 8).value(), 38);
    }

    #[test]
    fn from_ratio_zero_denominator_is_zero() {
        assert_eq!(Percentage::from_ratio(5, 0), Percentage::ZERO);
    }

    #[test]
    fn from_ratio_full_match_is_hundred() {
        assert_eq!(Percentage::from_ratio(30, 30), Percentage::HUNDRED);
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(format!("{}", Percentage::new(60)), "60%");
    }
}
