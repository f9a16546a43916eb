/// Sentiment client tests against a mocked text-analytics service.
use std::time::Duration;

use loan_advisor::advisor::Tone;
use loan_advisor::config::SentimentConfig;
use loan_advisor::error::SentimentError;
use loan_advisor::sentiment::{HttpSentimentAnalyzer, SentimentAnalyzer, detect_tone};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn analyzer(server: &MockServer, timeout: Duration) -> HttpSentimentAnalyzer {
    HttpSentimentAnalyzer::new(SentimentConfig {
        url: format!("{}/text-analytics", server.uri()),
        api_key: SecretString::from("test-key".to_string()),
        timeout,
    })
}

#[tokio::test]
async fn reads_score_from_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-analytics"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "features": ["sentiment"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentiment": { "score": 0.8, "label": "positive" },
            "keywords": ["loan"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let score = analyzer(&server, Duration::from_secs(5))
        .score("I love this")
        .await
        .unwrap();
    assert_eq!(score, Some(0.8));
}

#[tokio::test]
async fn missing_sentiment_block_is_no_opinion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "keywords": [] })))
        .mount(&server)
        .await;

    let score = analyzer(&server, Duration::from_secs(5)).score("ok").await.unwrap();
    assert_eq!(score, None);
}

#[tokio::test]
async fn server_error_is_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-analytics"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = analyzer(&server, Duration::from_secs(5)).score("hi").await.unwrap_err();
    match err {
        SentimentError::BadStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected BadStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn garbage_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = analyzer(&server, Duration::from_secs(5)).score("hi").await.unwrap_err();
    assert!(matches!(err, SentimentError::InvalidResponse { .. }));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-analytics"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "sentiment": { "score": 0.1 } }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = analyzer(&server, Duration::from_millis(100))
        .score("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, SentimentError::Timeout { .. }));
}

#[tokio::test]
async fn negative_score_makes_tone_supportive() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-analytics"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "sentiment": { "score": -0.75 } })),
        )
        .mount(&server)
        .await;

    let tone = detect_tone(&analyzer(&server, Duration::from_secs(5)), "this is awful").await;
    assert_eq!(tone, Tone::Supportive);
}

#[tokio::test]
async fn outage_falls_back_to_neutral() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let tone = detect_tone(&analyzer(&server, Duration::from_secs(5)), "hello").await;
    assert_eq!(tone, Tone::Neutral);
}
