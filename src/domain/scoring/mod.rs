//! Scoring engine.
//!
//! Pure, deterministic analysis of completed answer sets against the
//! question catalog. No storage access and no side effects.

mod analysis;

pub use analysis::{couple_analysis, solo_analysis, AnalysisResult, PROBLEM_AREA_THRESHOLD};
