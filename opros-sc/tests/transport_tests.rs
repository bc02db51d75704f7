//! Transport tests against a real in-process storage service
//!
//! Spins up the opros-ss router on an ephemeral port and drives it with
//! the client the way the survey tools do.

use opros_common::model::SurveyResponse;
use opros_sc::{RetryPolicy, SubmitClient, TransportError};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Start a storage service on an ephemeral port, returning its endpoint
async fn spawn_service() -> String {
    let pool = opros_ss::db::connect_memory()
        .await
        .expect("in-memory database");
    let catalog = Arc::new(opros_common::QuestionCatalog::embedded_default().clone());
    let app = opros_ss::build_router(opros_ss::AppState::new(pool, catalog, None));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::from_millis(10))
}

fn sample_response(submission_id: Option<&str>) -> SurveyResponse {
    let answers: BTreeMap<String, Value> = [
        ("question_1".to_string(), json!("yes")),
        ("question_2".to_string(), json!("no")),
    ]
    .into_iter()
    .collect();

    SurveyResponse {
        submission_id: submission_id.map(String::from),
        timestamp: "2025-06-01T12:00:00.000Z".to_string(),
        answers,
        feedback: json!("Great survey!"),
    }
}

#[tokio::test]
async fn test_submit_and_fetch_round_trip() {
    let endpoint = spawn_service().await;
    let client = SubmitClient::new(&endpoint, fast_policy(3)).unwrap();

    client
        .submit(sample_response(None))
        .await
        .expect("primary delivery should succeed");

    let envelope = client.fetch_results().await.unwrap();
    assert_eq!(envelope.total_count, 1);
    assert_eq!(envelope.responses[0].answers["question_1"], json!("yes"));
    assert_eq!(envelope.responses[0].feedback, json!("Great survey!"));
    // The client attached an idempotency key before delivery
    assert!(envelope.responses[0].submission_id.is_some());
}

#[tokio::test]
async fn test_retried_submission_is_not_duplicated() {
    let endpoint = spawn_service().await;
    let client = SubmitClient::new(&endpoint, fast_policy(3)).unwrap();

    let id = "e7b6a5c4-d3f2-41e0-9b8a-7c6d5e4f3a2b";
    client.submit(sample_response(Some(id))).await.unwrap();

    // Re-delivering the same submission id must not create a second row,
    // whatever the individual attempts report
    let _ = client.submit(sample_response(Some(id))).await;

    let envelope = client.fetch_results().await.unwrap();
    assert_eq!(envelope.total_count, 1);
}

#[tokio::test]
async fn test_unreachable_endpoint_exhausts_attempts() {
    // Bind then immediately drop a listener so the port refuses connections
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SubmitClient::new(format!("http://{}", addr), fast_policy(2)).unwrap();
    let result = client.submit(sample_response(None)).await;

    match result {
        Err(TransportError::Exhausted { attempts, .. }) => assert_eq!(attempts, 2),
        other => panic!("expected exhaustion, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_fetch_questions_returns_catalogue() {
    let endpoint = spawn_service().await;
    let client = SubmitClient::new(&endpoint, fast_policy(3)).unwrap();

    let catalog = client.fetch_questions().await.unwrap();
    assert!(!catalog.questions.is_empty());
    assert_eq!(catalog.options.yes_en, "Yes");
}
