//! HTTP round trips against in-process endpoints
//!
//! Each test binds a small axum router to an ephemeral local port and points a
//! real `RemoteInterpreter` or `RecordsClient` at it.

use crate::{
    FeedbackForm, FeedbackRecord, Generation, Interpreter, LocalInterpreter, Pipeline,
    RecordsClient, RemoteInterpreter,
};
use axum::{Json, Router, http::StatusCode, routing::get, routing::post};
use feedback_interp::{FeedbackOptions, TransformationRequest, apply_rules};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn interpret_endpoint(app: Router) -> RemoteInterpreter {
    let base = serve(app).await;
    RemoteInterpreter::new(&format!("{}/api/interpret", base)).unwrap()
}

/// Endpoint that applies the local rules, the way a conforming service would
fn rules_router() -> Router {
    Router::new().route(
        "/api/interpret",
        post(|Json(request): Json<TransformationRequest>| async move {
            Json(json!({ "output": apply_rules(&request.text, request.options) }))
        }),
    )
}

fn fixed_router(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        "/api/interpret",
        post(move || async move { (status, body) }),
    )
}

fn request(text: &str, options: FeedbackOptions) -> TransformationRequest {
    TransformationRequest::new(text, options)
}

// ========== Remote Mode Tests ==========

#[tokio::test]
async fn test_remote_sends_expected_body() {
    let app = Router::new().route(
        "/api/interpret",
        post(|Json(body): Json<Value>| async move { Json(json!({ "output": body.to_string() })) }),
    );
    let remote = interpret_endpoint(app).await;

    let output = remote
        .interpret(&request(
            "Good job",
            FeedbackOptions::new().with_case_support(true),
        ))
        .await
        .unwrap();
    let echoed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        echoed,
        json!({
            "text": "Good job",
            "options": {"simplify": false, "soften": false, "caseSupport": true}
        })
    );
}

#[tokio::test]
async fn test_remote_matches_local_rules() {
    let remote = interpret_endpoint(rules_router()).await;
    let cases = [
        ("Please utilize this.", FeedbackOptions::new().with_simplify(true).with_soften(true)),
        ("Good job", FeedbackOptions::new().with_case_support(true)),
        ("Demonstrate it", FeedbackOptions::new().with_simplify(true)),
        ("unchanged", FeedbackOptions::new()),
    ];

    for (text, options) in cases {
        let snapshot = request(text, options);
        let local = LocalInterpreter.interpret(&snapshot).await.unwrap();
        let remote_output = remote.interpret(&snapshot).await.unwrap();
        assert_eq!(remote_output, local, "text: {text:?}");
    }
}

#[tokio::test]
async fn test_remote_detail_is_failure() {
    let remote = interpret_endpoint(fixed_router(StatusCode::OK, r#"{"detail": "error"}"#)).await;
    let pipeline = Pipeline::new(Arc::new(remote));

    let result = pipeline
        .transform(&request("hello", FeedbackOptions::new()))
        .await;
    let failure = result.unwrap_err();
    assert_eq!(failure.display_message(), "error");
}

#[tokio::test]
async fn test_remote_error_status_surfaces_detail() {
    let remote = interpret_endpoint(fixed_router(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"detail": "Upstream model request failed"}"#,
    ))
    .await;
    let pipeline = Pipeline::new(Arc::new(remote));

    let failure = pipeline
        .transform(&request("hello", FeedbackOptions::new()))
        .await
        .unwrap_err();
    assert_eq!(failure.display_message(), "Upstream model request failed");
}

#[tokio::test]
async fn test_remote_error_status_without_body() {
    let remote = interpret_endpoint(fixed_router(StatusCode::SERVICE_UNAVAILABLE, "")).await;
    let pipeline = Pipeline::new(Arc::new(remote));

    let failure = pipeline
        .transform(&request("hello", FeedbackOptions::new()))
        .await
        .unwrap_err();
    assert_eq!(
        failure.display_message(),
        "Interpretation service returned status 503"
    );
}

#[tokio::test]
async fn test_remote_malformed_body() {
    let remote = interpret_endpoint(fixed_router(StatusCode::OK, "not json at all")).await;
    let pipeline = Pipeline::new(Arc::new(remote));

    let failure = pipeline
        .transform(&request("hello", FeedbackOptions::new()))
        .await
        .unwrap_err();
    assert_eq!(
        failure.display_message(),
        "Malformed response from interpretation service"
    );
}

#[tokio::test]
async fn test_remote_unreachable() {
    // Grab a free port, then release it so nothing is listening there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let remote = RemoteInterpreter::new(&format!("http://{}/api/interpret", addr)).unwrap();
    let pipeline = Pipeline::new(Arc::new(remote));

    let mut form = FeedbackForm::new();
    form.input_text = "hello".to_string();
    assert!(form.submit(&pipeline).await);
    assert_eq!(form.output_text, "Interpretation service is unreachable");
    assert!(!pipeline.is_pending());
}

#[tokio::test]
async fn test_remote_second_trigger_rejected_while_pending() {
    let app = Router::new().route(
        "/api/interpret",
        post(|| async {
            tokio::time::sleep(Duration::from_millis(150)).await;
            Json(json!({ "output": "slow" }))
        }),
    );
    let pipeline = Pipeline::new(Arc::new(interpret_endpoint(app).await));

    let first = pipeline.generate(request("first", FeedbackOptions::new()));
    let second = async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        pipeline
            .generate(request("second", FeedbackOptions::new()))
            .await
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, Generation::Completed(Ok("slow".to_string())));
    assert_eq!(second, Generation::Busy);

    let third = pipeline
        .generate(request("third", FeedbackOptions::new()))
        .await;
    assert_eq!(third, Generation::Completed(Ok("slow".to_string())));
}

// ========== Records Tests ==========

#[tokio::test]
async fn test_records_fetch() {
    let app = Router::new().route(
        "/api/feedback-records",
        get(|| async {
            Json(json!([
                {
                    "_id": "a1",
                    "created_at": "2026-01-05T15:04:00Z",
                    "input_text": "Please utilize this.",
                    "options": {"simplify": true, "soften": false, "caseSupport": false},
                    "output_text": "Please use this."
                },
                { "_id": "a2" },
                {
                    "_id": "a3",
                    "options": {"soften": true, "caseSupport": true, "tone": "formal"}
                }
            ]))
        }),
    );
    let base = serve(app).await;
    let client = RecordsClient::new(&format!("{}/api/feedback-records", base)).unwrap();

    let records = client.fetch().await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].options_display(), "Simplify");
    assert_eq!(records[0].output_display(), "Please use this.");
    assert_eq!(
        records[1],
        FeedbackRecord {
            id: Some("a2".to_string()),
            ..Default::default()
        }
    );
    assert_eq!(records[2].options_display(), "Soften, Case Support");
}

#[tokio::test]
async fn test_records_null_is_empty() {
    let app = Router::new().route("/api/feedback-records", get(|| async { Json(Value::Null) }));
    let base = serve(app).await;
    let client = RecordsClient::new(&format!("{}/api/feedback-records", base)).unwrap();

    assert!(client.fetch().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_records_error_status() {
    let app = Router::new().route(
        "/api/feedback-records",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = serve(app).await;
    let client = RecordsClient::new(&format!("{}/api/feedback-records", base)).unwrap();

    assert!(matches!(
        client.fetch().await,
        Err(crate::InterpretError::StatusError { status: 500, .. })
    ));
}
