//! Assessment question catalog.
//!
//! Thirty binary questions across six relationship categories. The catalog is
//! static and ordered; a session's cursor indexes into it directly.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::QuestionId;

/// Relationship category a question or task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Communication,
    Trust,
    Intimacy,
    Future,
    Conflict,
    QualityTime,
}

impl Category {
    /// All categories, in catalog order.
    pub const ALL: [Category; 6] = [
        Category::Communication,
        Category::Trust,
        Category::Intimacy,
        Category::Future,
        Category::Conflict,
        Category::QualityTime,
    ];

    /// Human-readable name (underscores rendered as spaces).
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Communication => "communication",
            Category::Trust => "trust",
            Category::Intimacy => "intimacy",
            Category::Future => "future",
            Category::Conflict => "conflict",
            Category::QualityTime => "quality time",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Access tier for questions and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
}

impl Tier {
    /// Returns true for the paid tier.
    pub fn is_premium(&self) -> bool {
        matches!(self, Tier::Premium)
    }
}

/// A respondent's binary answer to a question.
///
/// `Left` is the negative/disagree side of the card, `Right` the
/// positive/agree side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Left,
    Right,
}

impl Response {
    /// Returns true for the positive/agree response.
    pub fn is_positive(&self) -> bool {
        matches!(self, Response::Right)
    }
}

/// One assessment question. Immutable catalog entry, serialized for display
/// but never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: Category,
    pub prompt: &'static str,
    pub left_label: &'static str,
    pub right_label: &'static str,
    pub tier: Tier,
}

/// Number of questions in the catalog.
pub fn question_count() -> usize {
    QUESTIONS.len()
}

/// Looks up a question by id.
pub fn question_by_id(id: QuestionId) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

macro_rules! question {
    ($id:expr, $category:ident, $tier:ident, $prompt:expr, $left:expr, $right:expr) => {
        Question {
            id: QuestionId::new($id),
            category: Category::$category,
            prompt: $prompt,
            left_label: $left,
            right_label: $right,
            tier: Tier::$tier,
        }
    };
}

/// The full ordered question catalog.
pub static QUESTIONS: Lazy<Vec<Question>> = Lazy::new(|| {
    vec![
        // Communication (6 questions)
        question!(
            1,
            Communication,
            Free,
            "Do you feel comfortable sharing your true feelings with your partner?",
            "Not really",
            "Absolutely"
        ),
        question!(
            2,
            Communication,
            Free,
            "Does your partner listen when you talk about important things?",
            "Rarely",
            "Always"
        ),
        question!(
            3,
            Communication,
            Free,
            "Can you discuss difficult topics without it turning into a fight?",
            "No",
            "Yes"
        ),
        question!(
            4,
            Communication,
            Premium,
            "Do you feel heard and understood in this relationship?",
            "Not often",
            "Very much"
        ),
        question!(
            5,
            Communication,
            Premium,
            "Are you able to express your needs clearly?",
            "Struggle with it",
            "Yes, easily"
        ),
        question!(
            6,
            Communication,
            Premium,
            "Does your partner validate your feelings?",
            "Rarely",
            "Usually"
        ),
        // Trust (5 questions)
        question!(
            7,
            Trust,
            Free,
            "Do you trust your partner's intentions toward you?",
            "Sometimes doubt",
            "Fully trust"
        ),
        question!(
            8,
            Trust,
            Free,
            "Can you rely on your partner to keep their promises?",
            "Not always",
            "Definitely"
        ),
        question!(
            9,
            Trust,
            Premium,
            "Do you feel safe being vulnerable with your partner?",
            "Not really",
            "Completely"
        ),
        question!(
            10,
            Trust,
            Premium,
            "Has trust been broken in your relationship?",
            "Yes",
            "No"
        ),
        question!(
            11,
            Trust,
            Premium,
            "Are you willing to rebuild trust together?",
            "Unsure",
            "Yes, committed"
        ),
        // Intimacy (5 questions)
        question!(
            12,
            Intimacy,
            Free,
            "Are you satisfied with your emotional connection?",
            "Could be better",
            "Very satisfied"
        ),
        question!(
            13,
            Intimacy,
            Free,
            "Do you feel physically connected to your partner?",
            "Not much",
            "Strongly"
        ),
        question!(
            14,
            Intimacy,
            Free,
            "Does your partner show you affection regularly?",
            "Rarely",
            "Often"
        ),
        question!(
            15,
            Intimacy,
            Premium,
            "Do you miss the intimacy you once had?",
            "Not really",
            "Very much"
        ),
        question!(
            16,
            Intimacy,
            Premium,
            "Are you willing to work on rebuilding intimacy?",
            "Hesitant",
            "Yes, eager"
        ),
        // Future (5 questions)
        question!(
            17,
            Future,
            Free,
            "Can you see a future together with your partner?",
            "Uncertain",
            "Definitely"
        ),
        question!(
            18,
            Future,
            Free,
            "Do you share similar life goals?",
            "Very different",
            "Very similar"
        ),
        question!(
            19,
            Future,
            Free,
            "Are you both committed to making this work?",
            "One-sided",
            "Both committed"
        ),
        question!(
            20,
            Future,
            Premium,
            "Do you believe your relationship can be saved?",
            "Doubtful",
            "Hopeful"
        ),
        question!(
            21,
            Future,
            Premium,
            "Are you willing to put in the work to heal?",
            "Maybe",
            "Absolutely"
        ),
        // Conflict resolution (5 questions)
        question!(
            22,
            Conflict,
            Free,
            "Do you fight fair in arguments?",
            "Not usually",
            "Yes, we do"
        ),
        question!(
            23,
            Conflict,
            Free,
            "Can you apologize when you're wrong?",
            "Difficult",
            "Yes, easily"
        ),
        question!(
            24,
            Conflict,
            Premium,
            "Does your partner take responsibility for their actions?",
            "Rarely",
            "Usually"
        ),
        question!(
            25,
            Conflict,
            Premium,
            "Do conflicts get resolved or just swept under the rug?",
            "Swept away",
            "Resolved"
        ),
        question!(
            26,
            Conflict,
            Premium,
            "Are you willing to compromise for the relationship?",
            "Struggle with it",
            "Yes, willing"
        ),
        // Quality time (4 questions)
        question!(
            27,
            QualityTime,
            Free,
            "Do you spend enough meaningful time together?",
            "Not enough",
            "Plenty"
        ),
        question!(
            28,
            QualityTime,
            Free,
            "Do you enjoy each other's company?",
            "Sometimes",
            "Always"
        ),
        question!(
            29,
            QualityTime,
            Premium,
            "Do you make your relationship a priority?",
            "Not really",
            "Definitely"
        ),
        question!(
            30,
            QualityTime,
            Premium,
            "Would you like to spend more quality time together?",
            "Not sure",
            "Yes, very much"
        ),
    ]
});
