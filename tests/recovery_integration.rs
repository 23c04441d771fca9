//! Integration tests for account recovery and healing-task progress.
//!
//! These tests verify the end-to-end flow:
//! 1. A session is created with an email and password
//! 2. A verification code is issued, checked, and consumed by a reset
//! 3. The new password retrieves the session; the old one does not
//! 4. Task completions persist progress, streaks, and the derived task view
//!
//! Uses the in-memory store; no external dependencies.

use std::sync::Arc;

use rekindle::adapters::InMemoryStore;
use rekindle::application::repository::verification_key;
use rekindle::application::{AccountService, CreateSessionRequest, ProgressService, SessionService};
use rekindle::config::AppConfig;
use rekindle::domain::credentials::VerificationCode;
use rekindle::domain::foundation::{TaskId, Timestamp};
use rekindle::domain::session::SessionError;
use rekindle::ports::KeyValueStore;

struct Harness {
    sessions: SessionService,
    accounts: AccountService,
    progress: ProgressService,
    store: Arc<InMemoryStore>,
}

fn harness() -> Harness {
    let _ = tracing_subscriber::fmt::try_init();
    let store = Arc::new(InMemoryStore::new());
    Harness {
        sessions: SessionService::new(store.clone(), AppConfig::default()),
        accounts: AccountService::new(store.clone(), AppConfig::default()),
        progress: ProgressService::new(store.clone()),
        store,
    }
}

async fn seeded_session(harness: &Harness, email: &str, password: &str) -> rekindle::domain::session::Session {
    harness
        .sessions
        .create_solo(CreateSessionRequest {
            partner1_name: "Sam".to_string(),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            password_confirmation: Some(password.to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn password_reset_flow_end_to_end() {
    let h = harness();
    seeded_session(&h, "a@b.com", "abcd").await;

    let code = h.accounts.request_reset("a@b.com").await.unwrap();
    assert_eq!(code.len(), 6);
    assert!(h.accounts.verify_code("a@b.com", &code).await.unwrap());

    h.accounts.reset_password("a@b.com", "newpass").await.unwrap();

    // The old password no longer retrieves anything; the new one does.
    let old = h
        .sessions
        .sessions_by_email_and_password("a@b.com", "abcd")
        .await
        .unwrap();
    assert!(old.is_empty());
    let new = h
        .sessions
        .sessions_by_email_and_password("a@b.com", "newpass")
        .await
        .unwrap();
    assert_eq!(new.len(), 1);

    // The code was consumed by the reset.
    assert!(!h.accounts.verify_code("a@b.com", &code).await.unwrap());
}

#[tokio::test]
async fn reset_request_for_unknown_email_is_rejected() {
    let h = harness();
    seeded_session(&h, "a@b.com", "abcd").await;
    assert!(matches!(
        h.accounts.request_reset("other@b.com").await,
        Err(SessionError::EmailNotFound(_))
    ));
}

#[tokio::test]
async fn code_expired_sixteen_minutes_after_issue_is_rejected_and_deleted() {
    let h = harness();
    seeded_session(&h, "a@b.com", "abcd").await;

    // Plant a code issued 16 minutes before its own expiry check by
    // back-dating the issue time.
    let issued = Timestamp::now().add_minutes(-16);
    let code = VerificationCode::generate(&mut rand::thread_rng(), &issued, 15);
    h.store
        .set(
            &verification_key("a@b.com"),
            serde_json::to_string(&code).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        h.accounts.verify_code("a@b.com", code.code()).await,
        Err(SessionError::CodeInvalidOrExpired)
    );
    assert_eq!(
        h.store.get(&verification_key("a@b.com")).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn email_retrieval_example_round_trips() {
    let h = harness();
    let session = seeded_session(&h, "a@b.com", "abcd").await;

    let found = h
        .sessions
        .sessions_by_email_and_password("a@b.com", "abcd")
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code(), session.code());
}

#[tokio::test]
async fn task_progress_streak_and_derived_view_stay_consistent() {
    let h = harness();
    let session = seeded_session(&h, "a@b.com", "abcd").await;
    let code = session.code();

    let outcome = h.progress.complete_task(code, TaskId::new(1)).await.unwrap();
    assert_eq!(outcome.session.streak(), 1);
    assert!(outcome.new_milestones.is_empty());
    h.progress.complete_task(code, TaskId::new(4)).await.unwrap();

    // The derived view agrees with the aggregate's progress map.
    let statuses = h.progress.task_statuses(code).await.unwrap();
    let stored = h.sessions.load_session(code).await.unwrap();
    for status in &statuses {
        assert_eq!(status.completed, stored.is_task_completed(status.task.id));
    }
    assert_eq!(statuses.iter().filter(|s| s.completed).count(), 2);

    let summary = h.progress.summary(code).await.unwrap();
    assert_eq!(summary.current_streak, 1);
    assert_eq!(summary.total_tasks_completed, 2);
}
