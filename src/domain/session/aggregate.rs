//! Session aggregate entity.
//!
//! A session is one assessment instance - couple or solo - identified by its
//! shareable six-character code. It accumulates each respondent's answers,
//! tracks the question cursor, and carries task progress, streak state, and
//! optional retrieval credentials.
//!
//! # Concurrency
//!
//! Two partners may act on the same stored record from separate devices.
//! There is no version token; concurrent fetch-modify-write cycles resolve
//! as last-write-wins. The `current_question_index` cursor reflects the most
//! recently active respondent, which is why couple completion checks both
//! answer sequences independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{question_count, task_by_id, Response, Tier, QUESTIONS};
use crate::domain::foundation::{
    DomainError, ErrorCode, QuestionId, SessionCode, TaskId, Timestamp, ValidationError,
};
use crate::domain::progress::{effective_streak, milestones_reached, next_streak, Milestone};

/// Partner-2 display name used by solo sessions, which have no join step.
pub const SOLO_PARTNER_NAME: &str = "Solo Assessment";

/// Minimum and maximum accepted respondent age.
pub const AGE_RANGE: (u8, u8) = (13, 120);

/// Whether an assessment is taken by a couple or a single reflector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Couple,
    Solo,
}

/// The respondent performing an action on the session.
///
/// Solo sessions always act as `Partner1`; there is no second sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Respondent {
    Partner1,
    Partner2,
}

/// One recorded swipe. Never mutated after creation; removable only by undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub response: Response,
}

/// Optional respondent demographics for personalized guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    PreferNotToSay,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Parameters for creating a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub code: SessionCode,
    pub session_type: SessionType,
    pub partner1_name: String,
    pub user_email: Option<String>,
    pub password_hash: Option<String>,
    pub demographics: Demographics,
    pub created_at: Timestamp,
}

/// Session aggregate - one assessment instance.
///
/// # Invariants
///
/// - `current_question_index` stays in `[0, N]` and equals the acting
///   respondent's answer count at rest
/// - neither answer sequence ever exceeds the catalog length
/// - `completed` transitions false to true exactly once, never back
/// - `milestones` only grows
/// - `code` and `created_at` are immutable after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    code: SessionCode,
    session_type: SessionType,
    partner1_name: String,
    partner2_name: String,
    partner1_answers: Vec<Answer>,
    partner2_answers: Vec<Answer>,
    current_question_index: usize,
    completed: bool,
    paid: bool,
    subscription_tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    subscription_expiry: Option<Timestamp>,
    #[serde(default)]
    task_progress: BTreeMap<TaskId, bool>,
    created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password_hash: Option<String>,
    #[serde(default)]
    demographics: Demographics,
    #[serde(default)]
    streak: u32,
    #[serde(default)]
    longest_streak: u32,
    #[serde(default)]
    total_tasks_completed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_activity_date: Option<Timestamp>,
    #[serde(default)]
    milestones: Vec<Milestone>,
}

impl Session {
    /// Create a new session with zeroed progress.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the creator's name is blank
    /// - `InvalidFormat` if an email is present but malformed
    /// - `OutOfRange` if an age is present but outside 13-120
    pub fn create(params: NewSession) -> Result<Self, DomainError> {
        let partner1_name = params.partner1_name.trim().to_string();
        if partner1_name.is_empty() {
            return Err(ValidationError::empty_field("partner1_name").into());
        }

        let user_email = match params.user_email {
            Some(email) => Some(Self::validate_email(&email)?),
            None => None,
        };
        Self::validate_demographics(&params.demographics)?;

        let partner2_name = match params.session_type {
            SessionType::Couple => String::new(),
            SessionType::Solo => SOLO_PARTNER_NAME.to_string(),
        };

        Ok(Self {
            code: params.code,
            session_type: params.session_type,
            partner1_name,
            partner2_name,
            partner1_answers: Vec::new(),
            partner2_answers: Vec::new(),
            current_question_index: 0,
            completed: false,
            paid: false,
            subscription_tier: Tier::Free,
            subscription_expiry: None,
            task_progress: BTreeMap::new(),
            created_at: params.created_at,
            user_email,
            password_hash: params.password_hash,
            demographics: params.demographics,
            streak: 0,
            longest_streak: 0,
            total_tasks_completed: 0,
            last_activity_date: None,
            milestones: Vec::new(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn partner1_name(&self) -> &str {
        &self.partner1_name
    }

    pub fn partner2_name(&self) -> &str {
        &self.partner2_name
    }

    /// True once partner 2 has joined (always true for solo sessions).
    pub fn has_partner2(&self) -> bool {
        !self.partner2_name.is_empty()
    }

    pub fn answers_for(&self, respondent: Respondent) -> &[Answer] {
        match respondent {
            Respondent::Partner1 => &self.partner1_answers,
            Respondent::Partner2 => &self.partner2_answers,
        }
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    pub fn subscription_tier(&self) -> Tier {
        self.subscription_tier
    }

    pub fn subscription_expiry(&self) -> Option<&Timestamp> {
        self.subscription_expiry.as_ref()
    }

    pub fn task_progress(&self) -> &BTreeMap<TaskId, bool> {
        &self.task_progress
    }

    /// True if the given task has been completed in this session.
    pub fn is_task_completed(&self, task_id: TaskId) -> bool {
        self.task_progress.get(&task_id).copied().unwrap_or(false)
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    /// Raw stored streak. May be stale; use [`Session::current_streak`] for
    /// display.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn total_tasks_completed(&self) -> u32 {
        self.total_tasks_completed
    }

    pub fn last_activity_date(&self) -> Option<&Timestamp> {
        self.last_activity_date.as_ref()
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Partner 2 joins a couple session.
    ///
    /// Calling again overwrites the name (last write wins).
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` for solo sessions, which have no join step
    /// - `EmptyField` if the name is blank
    pub fn join(&mut self, partner2_name: &str) -> Result<(), DomainError> {
        if self.session_type == SessionType::Solo {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Solo sessions have no join step",
            ));
        }
        let name = partner2_name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("partner2_name").into());
        }
        self.partner2_name = name.to_string();
        Ok(())
    }

    /// Records the acting respondent's answer to their next unanswered
    /// question. The sole question-advance mechanism.
    ///
    /// The question is chosen by the acting respondent's own answer count;
    /// the stored cursor is then set to mirror it, so after this call the
    /// cursor equals the most recent actor's answer count.
    ///
    /// Returns `true` when this answer completed the session.
    ///
    /// # Errors
    ///
    /// - `SessionCompleted` if the session is already complete
    /// - `InvalidStateTransition` if the respondent does not fit the session
    ///   type or their answer sequence is already full
    pub fn record_answer(
        &mut self,
        respondent: Respondent,
        response: Response,
    ) -> Result<bool, DomainError> {
        self.ensure_open()?;
        self.ensure_respondent(respondent)?;

        let position = self.answers_for(respondent).len();
        if position >= question_count() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "All questions have been answered",
            ));
        }

        let answer = Answer {
            question_id: QUESTIONS[position].id,
            response,
        };
        self.answers_mut(respondent).push(answer);
        self.current_question_index = position + 1;

        Ok(self.check_completion())
    }

    /// Removes the acting respondent's most recent answer and resets the
    /// cursor to their remaining count. Symmetric inverse of
    /// [`Session::record_answer`].
    ///
    /// Returns `false` (a no-op) when the sequence is already empty; safe to
    /// call repeatedly down to zero.
    ///
    /// # Errors
    ///
    /// - `SessionCompleted` if the session is already complete
    /// - `InvalidStateTransition` if the respondent does not fit the session
    ///   type
    pub fn undo(&mut self, respondent: Respondent) -> Result<bool, DomainError> {
        self.ensure_open()?;
        self.ensure_respondent(respondent)?;

        if self.answers_for(respondent).is_empty() {
            return Ok(false);
        }
        self.answers_mut(respondent).pop();
        self.current_question_index = self.answers_for(respondent).len();
        Ok(true)
    }

    /// Mode-specific completion predicate.
    ///
    /// Solo: the cursor has passed the last question. Couple: additionally
    /// both sequences must hold a full set, because the shared cursor only
    /// reflects the most recently active respondent.
    fn check_completion(&mut self) -> bool {
        if self.completed {
            return true;
        }
        let total = question_count();
        let done = match self.session_type {
            SessionType::Solo => self.current_question_index >= total,
            SessionType::Couple => {
                self.current_question_index >= total
                    && self.partner1_answers.len() == total
                    && self.partner2_answers.len() == total
            }
        };
        if done {
            self.completed = true;
        }
        done
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Billing flags (inert metadata; payment flow is out of scope)
    // ─────────────────────────────────────────────────────────────────────────

    /// Flags the session premium for `duration_days` from `now`.
    pub fn upgrade_to_premium(&mut self, now: &Timestamp, duration_days: i64) {
        self.paid = true;
        self.subscription_tier = Tier::Premium;
        self.subscription_expiry = Some(now.add_days(duration_days));
    }

    /// Checks whether the premium subscription is active, lazily downgrading
    /// to the free tier when the expiry has passed.
    pub fn check_subscription(&mut self, now: &Timestamp) -> bool {
        if self.subscription_tier == Tier::Free {
            return false;
        }
        if let Some(expiry) = &self.subscription_expiry {
            if expiry.is_before(now) {
                self.subscription_tier = Tier::Free;
                self.paid = false;
                return false;
            }
        }
        self.paid && self.subscription_tier == Tier::Premium
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Progress tracking
    // ─────────────────────────────────────────────────────────────────────────

    /// Marks a healing task complete and advances streak state.
    ///
    /// Returns the milestones newly earned by the resulting streak.
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` if the id is not in the catalog
    pub fn complete_task(
        &mut self,
        task_id: TaskId,
        now: &Timestamp,
    ) -> Result<Vec<Milestone>, DomainError> {
        if task_by_id(task_id).is_none() {
            return Err(DomainError::new(
                ErrorCode::TaskNotFound,
                format!("No healing task with id {}", task_id),
            ));
        }

        self.task_progress.insert(task_id, true);

        let update = next_streak(
            self.last_activity_date.as_ref(),
            now,
            self.streak,
            self.longest_streak,
        );
        self.streak = update.streak;
        self.longest_streak = update.longest_streak;
        self.last_activity_date = Some(*now);
        self.total_tasks_completed += 1;

        let earned = milestones_reached(self.streak, &self.milestones);
        self.milestones.extend(&earned);
        Ok(earned)
    }

    /// Streak for display: 0 when more than one full day has elapsed since
    /// the last activity, otherwise the stored value. The stored field is not
    /// eagerly zeroed; the next completion recomputes it.
    pub fn current_streak(&self, now: &Timestamp) -> u32 {
        effective_streak(self.streak, self.last_activity_date.as_ref(), now)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Credentials
    // ─────────────────────────────────────────────────────────────────────────

    /// Overwrites the password digest (password-reset flow).
    pub fn set_password_hash(&mut self, digest: String) {
        self.password_hash = Some(digest);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn answers_mut(&mut self, respondent: Respondent) -> &mut Vec<Answer> {
        match respondent {
            Respondent::Partner1 => &mut self.partner1_answers,
            Respondent::Partner2 => &mut self.partner2_answers,
        }
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.completed {
            return Err(DomainError::new(
                ErrorCode::SessionCompleted,
                "Session is already completed",
            ));
        }
        Ok(())
    }

    fn ensure_respondent(&self, respondent: Respondent) -> Result<(), DomainError> {
        if self.session_type == SessionType::Solo && respondent == Respondent::Partner2 {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Solo sessions have a single respondent",
            ));
        }
        Ok(())
    }

    fn validate_email(email: &str) -> Result<String, DomainError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::invalid_format("email", "expected name@domain.tld").into());
        }
        Ok(email.to_string())
    }

    fn validate_demographics(demographics: &Demographics) -> Result<(), DomainError> {
        if let Some(age) = demographics.age {
            let (min, max) = AGE_RANGE;
            if age < min || age > max {
                return Err(ValidationError::out_of_range(
                    "age",
                    i32::from(min),
                    i32::from(max),
                    i32::from(age),
                )
                .into());
            }
        }
        Ok(())
    }
}

/// Shape check equivalent to `name@domain.tld`: no whitespace, a single `@`,
/// and a dot inside the domain part.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
