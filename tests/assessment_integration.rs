//! Integration tests for the assessment lifecycle.
//!
//! These tests verify the end-to-end flow:
//! 1. Partner 1 creates a session and shares the code
//! 2. Partner 2 joins and both answer all questions at their own pace
//! 3. Completion triggers; analysis scores the couple
//! 4. Premium upgrade and lazy downgrade round-trip through the store
//!
//! Uses the in-memory store; no external dependencies.

use std::sync::Arc;

use rekindle::adapters::InMemoryStore;
use rekindle::application::repository::session_key;
use rekindle::application::{CreateSessionRequest, SessionService};
use rekindle::config::AppConfig;
use rekindle::domain::catalog::{question_count, Response};
use rekindle::domain::session::{Respondent, Session, SessionError};
use rekindle::ports::KeyValueStore;

fn harness() -> (SessionService, Arc<InMemoryStore>) {
    let _ = tracing_subscriber::fmt::try_init();
    let store = Arc::new(InMemoryStore::new());
    let service = SessionService::new(store.clone(), AppConfig::default());
    (service, store)
}

async fn answer_all(service: &SessionService, session: &Session, respondent: Respondent, response: Response) {
    for _ in 0..question_count() {
        service
            .record_answer(session.code(), respondent, response)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn couple_journey_from_create_to_analysis() {
    let (service, _) = harness();

    let session = service
        .create_couple(CreateSessionRequest {
            partner1_name: "Alex".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let joined = service.join_session(session.code(), "Blake").await.unwrap();
    assert_eq!(joined.partner2_name(), "Blake");

    // Partner 1 races ahead; partner 2 has not started.
    answer_all(&service, &session, Respondent::Partner1, Response::Right).await;
    let midway = service.load_session(session.code()).await.unwrap();
    assert!(!midway.is_completed());
    assert_eq!(midway.answers_for(Respondent::Partner1).len(), question_count());
    assert!(midway.answers_for(Respondent::Partner2).is_empty());

    // Analysis is refused until both are done.
    assert!(matches!(
        service.analyze(session.code()).await,
        Err(SessionError::InvalidState(_))
    ));

    answer_all(&service, &session, Respondent::Partner2, Response::Right).await;
    let done = service.load_session(session.code()).await.unwrap();
    assert!(done.is_completed());

    let result = service.analyze(session.code()).await.unwrap();
    assert_eq!(result.compatibility_score.value(), 100);
    assert!(result.problem_areas.is_empty());
}

#[tokio::test]
async fn solo_journey_scores_positive_responses() {
    let (service, _) = harness();

    let session = service
        .create_solo(CreateSessionRequest {
            partner1_name: "Sam".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    // 18 positive then 12 negative responses.
    for i in 0..question_count() {
        let response = if i < 18 { Response::Right } else { Response::Left };
        service
            .record_answer(session.code(), Respondent::Partner1, response)
            .await
            .unwrap();
    }

    let result = service.analyze(session.code()).await.unwrap();
    assert_eq!(result.compatibility_score.value(), 60);
    assert_eq!(result.matches, 18);
    assert_eq!(result.mismatches, 12);
}

#[tokio::test]
async fn undo_lets_a_respondent_revise_their_last_answer() {
    let (service, _) = harness();

    let session = service
        .create_solo(CreateSessionRequest {
            partner1_name: "Sam".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    service
        .record_answer(session.code(), Respondent::Partner1, Response::Left)
        .await
        .unwrap();
    service
        .undo_answer(session.code(), Respondent::Partner1)
        .await
        .unwrap();
    let outcome = service
        .record_answer(session.code(), Respondent::Partner1, Response::Right)
        .await
        .unwrap();

    let answers = outcome.session.answers_for(Respondent::Partner1);
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].response, Response::Right);
}

#[tokio::test]
async fn concurrent_writers_resolve_as_last_write_wins() {
    // There is no version token on the stored record: a stale writer
    // silently discards a newer write. This pins that known behavior.
    let (service, store) = harness();

    let session = service
        .create_couple(CreateSessionRequest {
            partner1_name: "Alex".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let key = session_key(session.code());

    // Device A snapshots the record, then device B joins and saves.
    let stale_snapshot = store.get(&key).await.unwrap().unwrap();
    service.join_session(session.code(), "Blake").await.unwrap();

    // Device A writes its stale snapshot back; the join is lost.
    store.set(&key, stale_snapshot).await.unwrap();
    let current = service.load_session(session.code()).await.unwrap();
    assert!(!current.has_partner2());
}

#[tokio::test]
async fn premium_upgrade_persists_and_reports_active() {
    let (service, _) = harness();

    let session = service
        .create_couple(CreateSessionRequest {
            partner1_name: "Alex".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!service.check_subscription(session.code()).await.unwrap());

    let upgraded = service.upgrade_to_premium(session.code()).await.unwrap();
    assert!(upgraded.is_paid());
    assert!(upgraded.subscription_expiry().is_some());
    assert!(service.check_subscription(session.code()).await.unwrap());
}

#[tokio::test]
async fn unknown_session_code_surfaces_not_found() {
    let (service, _) = harness();
    let code = "AAAAAA".parse().unwrap();
    assert!(matches!(
        service.load_session(&code).await,
        Err(SessionError::NotFound(_))
    ));
}
