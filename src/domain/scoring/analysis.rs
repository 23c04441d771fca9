//! Compatibility and self-reflection analysis.
//!
//! The couple variant joins the two answer sets by question id, so partners
//! who answered in different orders (or undid and re-answered) are still
//! compared question-for-question. The overall denominator is partner 1's
//! answer count, matching the original scoring contract.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::domain::catalog::{question_by_id, Category, Response};
use crate::domain::foundation::Percentage;
use crate::domain::session::Answer;

/// Category scores strictly below this mark are flagged as problem areas.
pub const PROBLEM_AREA_THRESHOLD: u8 = 50;

/// Outcome of a couple or solo analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Overall score: percentage of matches (couple) or positive responses
    /// (solo) over the answered questions.
    pub compatibility_score: Percentage,
    /// Per-category percentage; 0 for categories with no answered questions.
    pub category_scores: BTreeMap<Category, Percentage>,
    /// Matching (couple) or positive (solo) answer count.
    pub matches: u32,
    /// The remaining answers.
    pub mismatches: u32,
    /// Display names of categories scoring below the threshold, weakest first.
    pub problem_areas: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    hits: u32,
    total: u32,
}

/// Scores two partners' answer sets against each other.
///
/// A question counts toward a category when partner 1 answered it, the
/// catalog knows it, and partner 2 answered the same question; it counts as
/// a match when both chose the same side. The overall score divides by
/// partner 1's full answer count, so questions partner 2 skipped still
/// weigh against the couple.
pub fn couple_analysis(answers1: &[Answer], answers2: &[Answer]) -> AnalysisResult {
    let partner2: HashMap<_, _> = answers2
        .iter()
        .map(|a| (a.question_id, a.response))
        .collect();

    let mut tallies: BTreeMap<Category, Tally> = zeroed_tallies();
    let mut matches = 0u32;

    for answer in answers1 {
        let Some(question) = question_by_id(answer.question_id) else {
            continue;
        };
        let Some(other) = partner2.get(&answer.question_id) else {
            continue;
        };
        let tally = tallies.entry(question.category).or_default();
        tally.total += 1;
        if answer.response == *other {
            tally.hits += 1;
            matches += 1;
        }
    }

    build_result(tallies, matches, answers1.len() as u32)
}

/// Scores a single respondent's answers, treating `Right` as positive.
pub fn solo_analysis(answers: &[Answer]) -> AnalysisResult {
    let mut tallies: BTreeMap<Category, Tally> = zeroed_tallies();
    let mut positives = 0u32;

    for answer in answers {
        let Some(question) = question_by_id(answer.question_id) else {
            continue;
        };
        let tally = tallies.entry(question.category).or_default();
        tally.total += 1;
        if answer.response.is_positive() {
            tally.hits += 1;
            positives += 1;
        }
    }

    build_result(tallies, positives, answers.len() as u32)
}

fn zeroed_tallies() -> BTreeMap<Category, Tally> {
    Category::ALL
        .into_iter()
        .map(|c| (c, Tally::default()))
        .collect()
}

fn build_result(
    tallies: BTreeMap<Category, Tally>,
    matches: u32,
    total_questions: u32,
) -> AnalysisResult {
    let category_scores: BTreeMap<Category, Percentage> = tallies
        .iter()
        .map(|(category, tally)| (*category, Percentage::from_ratio(tally.hits, tally.total)))
        .collect();

    let mut below_threshold: Vec<(Category, Percentage)> = category_scores
        .iter()
        .filter(|(_, score)| score.value() < PROBLEM_AREA_THRESHOLD)
        .map(|(category, score)| (*category, *score))
        .collect();
    below_threshold.sort_by_key(|(_, score)| *score);

    AnalysisResult {
        compatibility_score: Percentage::from_ratio(matches, total_questions),
        category_scores,
        matches,
        mismatches: total_questions.saturating_sub(matches),
        problem_areas: below_threshold
            .into_iter()
            .map(|(category, _)| category.display_name().to_string())
            .collect(),
    }
}
