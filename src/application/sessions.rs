//! SessionService - session lifecycle orchestration over the store.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::repository::{self, session_key};
use crate::config::AppConfig;
use crate::domain::catalog::Response;
use crate::domain::credentials::{hash_password, verify_password};
use crate::domain::foundation::{SessionCode, Timestamp};
use crate::domain::scoring::{couple_analysis, solo_analysis, AnalysisResult};
use crate::domain::session::{
    Demographics, NewSession, Respondent, Session, SessionError, SessionType,
};
use crate::ports::KeyValueStore;

/// How many candidate codes to try before giving up on creation.
const MAX_CODE_ATTEMPTS: usize = 8;

/// Request to create a new session.
#[derive(Debug, Clone, Default)]
pub struct CreateSessionRequest {
    pub partner1_name: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub demographics: Demographics,
}

/// Result of recording one answer.
#[derive(Debug, Clone)]
pub struct RecordAnswerOutcome {
    pub session: Session,
    /// True when this answer completed the session; the caller routes to
    /// results.
    pub completed: bool,
}

/// Service for creating, joining, and advancing assessment sessions.
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    config: AppConfig,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>, config: AppConfig) -> Self {
        Self { store, config }
    }

    /// Creates a couple session.
    pub async fn create_couple(
        &self,
        request: CreateSessionRequest,
    ) -> Result<Session, SessionError> {
        self.create_session(SessionType::Couple, request).await
    }

    /// Creates a solo session.
    pub async fn create_solo(
        &self,
        request: CreateSessionRequest,
    ) -> Result<Session, SessionError> {
        self.create_session(SessionType::Solo, request).await
    }

    async fn create_session(
        &self,
        session_type: SessionType,
        request: CreateSessionRequest,
    ) -> Result<Session, SessionError> {
        // Hashing is sequenced before any write; nothing persists when
        // validation fails.
        let password_hash = self.validate_password(&request)?;
        let code = self.allocate_code().await?;

        let session = Session::create(NewSession {
            code,
            session_type,
            partner1_name: request.partner1_name,
            user_email: request.email,
            password_hash,
            demographics: request.demographics,
            created_at: Timestamp::now(),
        })?;

        repository::save_session(self.store.as_ref(), &session).await?;
        info!(code = %session.code(), session_type = ?session.session_type(), "session created");
        Ok(session)
    }

    /// Loads a session by its join code.
    pub async fn load_session(&self, code: &SessionCode) -> Result<Session, SessionError> {
        repository::load_session(self.store.as_ref(), code).await
    }

    /// Partner 2 joins a couple session. Re-joining overwrites the name.
    pub async fn join_session(
        &self,
        code: &SessionCode,
        partner2_name: &str,
    ) -> Result<Session, SessionError> {
        let mut session = self.load_session(code).await?;
        session.join(partner2_name)?;
        repository::save_session(self.store.as_ref(), &session).await?;
        info!(code = %code, "partner 2 joined");
        Ok(session)
    }

    /// Records the acting respondent's answer to the current question.
    pub async fn record_answer(
        &self,
        code: &SessionCode,
        respondent: Respondent,
        response: Response,
    ) -> Result<RecordAnswerOutcome, SessionError> {
        let mut session = self.load_session(code).await?;
        let completed = session.record_answer(respondent, response)?;
        repository::save_session(self.store.as_ref(), &session).await?;
        if completed {
            info!(code = %code, "assessment completed");
        } else {
            debug!(code = %code, index = session.current_question_index(), "answer recorded");
        }
        Ok(RecordAnswerOutcome { session, completed })
    }

    /// Removes the acting respondent's most recent answer. No-op when the
    /// sequence is empty.
    pub async fn undo_answer(
        &self,
        code: &SessionCode,
        respondent: Respondent,
    ) -> Result<Session, SessionError> {
        let mut session = self.load_session(code).await?;
        if session.undo(respondent)? {
            repository::save_session(self.store.as_ref(), &session).await?;
        }
        Ok(session)
    }

    /// Scores a completed session.
    ///
    /// # Errors
    ///
    /// - `InvalidState` when the session is not yet complete
    pub async fn analyze(&self, code: &SessionCode) -> Result<AnalysisResult, SessionError> {
        let session = self.load_session(code).await?;
        if !session.is_completed() {
            return Err(SessionError::invalid_state(
                "Analysis requires a completed session",
            ));
        }
        Ok(match session.session_type() {
            SessionType::Couple => couple_analysis(
                session.answers_for(Respondent::Partner1),
                session.answers_for(Respondent::Partner2),
            ),
            SessionType::Solo => solo_analysis(session.answers_for(Respondent::Partner1)),
        })
    }

    /// Flags the session premium for the configured duration.
    pub async fn upgrade_to_premium(&self, code: &SessionCode) -> Result<Session, SessionError> {
        let mut session = self.load_session(code).await?;
        session.upgrade_to_premium(&Timestamp::now(), self.config.billing.premium_duration_days);
        repository::save_session(self.store.as_ref(), &session).await?;
        info!(code = %code, "session upgraded to premium");
        Ok(session)
    }

    /// Checks whether the premium subscription is active, persisting the
    /// lazy downgrade when an expiry has passed.
    pub async fn check_subscription(&self, code: &SessionCode) -> Result<bool, SessionError> {
        let mut session = self.load_session(code).await?;
        let was_paid = session.is_paid();
        let active = session.check_subscription(&Timestamp::now());
        if was_paid && !active {
            repository::save_session(self.store.as_ref(), &session).await?;
            info!(code = %code, "expired subscription downgraded");
        }
        Ok(active)
    }

    /// All sessions registered for an email, newest first.
    pub async fn sessions_by_email(&self, email: &str) -> Result<Vec<Session>, SessionError> {
        let codes = repository::load_email_index(self.store.as_ref(), email).await?;
        let mut sessions = Vec::with_capacity(codes.len());
        for code in codes {
            match repository::load_session(self.store.as_ref(), &code).await {
                Ok(session) => sessions.push(session),
                Err(SessionError::NotFound(_)) => {
                    warn!(code = %code, "indexed session record is missing");
                }
                Err(other) => return Err(other),
            }
        }
        sessions.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(sessions)
    }

    /// Sessions for an email whose stored digest matches the password.
    ///
    /// A wrong password yields an empty list, not an error.
    pub async fn sessions_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Vec<Session>, SessionError> {
        let sessions = self.sessions_by_email(email).await?;
        Ok(sessions
            .into_iter()
            .filter(|s| {
                s.password_hash()
                    .map(|digest| verify_password(password, digest))
                    .unwrap_or(false)
            })
            .collect())
    }

    fn validate_password(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<Option<String>, SessionError> {
        let Some(password) = &request.password else {
            return Ok(None);
        };
        if request.email.is_none() {
            return Err(SessionError::validation(
                "password",
                "A password requires an email for retrieval",
            ));
        }
        let min = self.config.auth.min_password_length;
        if password.len() < min {
            return Err(SessionError::validation(
                "password",
                format!("Password must be at least {} characters", min),
            ));
        }
        if request.password_confirmation.as_deref() != Some(password.as_str()) {
            return Err(SessionError::validation(
                "password_confirmation",
                "Passwords do not match",
            ));
        }
        Ok(Some(hash_password(password)))
    }

    async fn allocate_code(&self) -> Result<SessionCode, SessionError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let candidate = SessionCode::generate(&mut rand::thread_rng());
            if self.store.get(&session_key(&candidate)).await?.is_none() {
                return Ok(candidate);
            }
            debug!(code = %candidate, "session code collision, retrying");
        }
        Err(SessionError::storage(
            "could not allocate an unused session code",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStore;
    use crate::domain::catalog::question_count;

    fn service() -> (SessionService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let service = SessionService::new(store.clone(), AppConfig::default());
        (service, store)
    }

    fn named(name: &str) -> CreateSessionRequest {
        CreateSessionRequest {
            partner1_name: name.to_string(),
            ..Default::default()
        }
    }

    fn with_account(name: &str, email: &str, password: &str) -> CreateSessionRequest {
        CreateSessionRequest {
            partner1_name: name.to_string(),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            password_confirmation: Some(password.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_persists_a_loadable_session() {
        let (service, _) = service();
        let session = service.create_couple(named("Alex")).await.unwrap();
        let loaded = service.load_session(session.code()).await.unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn create_rejects_blank_name_without_writing() {
        let (service, store) = service();
        assert!(service.create_couple(named("  ")).await.is_err());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn create_rejects_short_password_without_writing() {
        let (service, store) = service();
        let result = service
            .create_solo(with_account("Sam", "a@b.com", "abc"))
            .await;
        assert!(matches!(
            result,
            Err(SessionError::ValidationFailed { .. })
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn create_rejects_mismatched_confirmation() {
        let (service, _) = service();
        let mut request = with_account("Sam", "a@b.com", "abcd");
        request.password_confirmation = Some("abce".to_string());
        assert!(service.create_solo(request).await.is_err());
    }

    #[tokio::test]
    async fn create_rejects_password_without_email() {
        let (service, _) = service();
        let mut request = named("Sam");
        request.password = Some("abcd".to_string());
        request.password_confirmation = Some("abcd".to_string());
        assert!(service.create_solo(request).await.is_err());
    }

    #[tokio::test]
    async fn join_unknown_code_is_not_found() {
        let (service, _) = service();
        let code: SessionCode = "ZZZZZZ".parse().unwrap();
        let err = service.join_session(&code, "Blake").await.unwrap_err();
        assert!(matches!(err, SessionError::NotFound(_)));
    }

    #[tokio::test]
    async fn join_persists_partner2_name() {
        let (service, _) = service();
        let session = service.create_couple(named("Alex")).await.unwrap();
        service.join_session(session.code(), "Blake").await.unwrap();
        let loaded = service.load_session(session.code()).await.unwrap();
        assert_eq!(loaded.partner2_name(), "Blake");
    }

    #[tokio::test]
    async fn record_and_undo_round_trip_through_the_store() {
        let (service, _) = service();
        let session = service.create_solo(named("Sam")).await.unwrap();
        let code = session.code().clone();

        let outcome = service
            .record_answer(&code, Respondent::Partner1, Response::Right)
            .await
            .unwrap();
        assert!(!outcome.completed);
        assert_eq!(outcome.session.current_question_index(), 1);

        let after_undo = service
            .undo_answer(&code, Respondent::Partner1)
            .await
            .unwrap();
        assert_eq!(after_undo.current_question_index(), 0);
        assert_eq!(service.load_session(&code).await.unwrap(), after_undo);
    }

    #[tokio::test]
    async fn solo_completion_is_signalled_on_last_answer() {
        let (service, _) = service();
        let session = service.create_solo(named("Sam")).await.unwrap();
        let code = session.code().clone();

        for i in 0..question_count() {
            let outcome = service
                .record_answer(&code, Respondent::Partner1, Response::Right)
                .await
                .unwrap();
            assert_eq!(outcome.completed, i == question_count() - 1);
        }
        assert!(service.load_session(&code).await.unwrap().is_completed());
    }

    #[tokio::test]
    async fn analyze_requires_completion() {
        let (service, _) = service();
        let session = service.create_solo(named("Sam")).await.unwrap();
        let err = service.analyze(session.code()).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidState(_)));
    }

    #[tokio::test]
    async fn analyze_scores_a_completed_solo_session() {
        let (service, _) = service();
        let session = service.create_solo(named("Sam")).await.unwrap();
        let code = session.code().clone();
        for i in 0..question_count() {
            let response = if i < 10 { Response::Right } else { Response::Left };
            service
                .record_answer(&code, Respondent::Partner1, response)
                .await
                .unwrap();
        }
        let result = service.analyze(&code).await.unwrap();
        assert_eq!(result.compatibility_score.value(), 33);
    }

    #[tokio::test]
    async fn email_and_password_retrieval_round_trips() {
        let (service, _) = service();
        let session = service
            .create_solo(with_account("Sam", "a@b.com", "abcd"))
            .await
            .unwrap();

        let found = service
            .sessions_by_email_and_password("a@b.com", "abcd")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code(), session.code());

        let wrong = service
            .sessions_by_email_and_password("a@b.com", "wrong")
            .await
            .unwrap();
        assert!(wrong.is_empty());
    }

    #[tokio::test]
    async fn sessions_by_email_returns_newest_first() {
        let (service, _) = service();
        let first = service
            .create_solo(with_account("Sam", "a@b.com", "abcd"))
            .await
            .unwrap();
        let second = service
            .create_solo(with_account("Sam", "a@b.com", "abcd"))
            .await
            .unwrap();

        let sessions = service.sessions_by_email("A@B.COM").await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(sessions[0].created_at() >= sessions[1].created_at());
        let codes: Vec<_> = sessions.iter().map(|s| s.code().clone()).collect();
        assert!(codes.contains(first.code()));
        assert!(codes.contains(second.code()));
    }

    #[tokio::test]
    async fn upgrade_then_check_subscription_is_active() {
        let (service, _) = service();
        let session = service.create_couple(named("Alex")).await.unwrap();
        service.upgrade_to_premium(session.code()).await.unwrap();
        assert!(service.check_subscription(session.code()).await.unwrap());
    }

    #[tokio::test]
    async fn check_subscription_on_free_session_is_false() {
        let (service, _) = service();
        let session = service.create_couple(named("Alex")).await.unwrap();
        assert!(!service.check_subscription(session.code()).await.unwrap());
    }
}
