//! Integration tests for the Gemini provider using wiremock.

use std::time::Duration;

use trail_scout::llm::gemini::GeminiProvider;
use trail_scout::TrailError;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(mock_server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(
        &mock_server.uri(),
        "gemini-1.5-flash",
        "test-key".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_complete_sends_prompt_and_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Trails near Squamish?" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Name: Stawamus Chief" }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = provider(&mock_server).complete("Trails near Squamish?").await.unwrap();

    assert_eq!(reply, "Name: Stawamus Chief");
}

#[tokio::test]
async fn test_complete_blocked_prompt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).complete("anything").await.unwrap_err();

    assert!(matches!(err, TrailError::Blocked(ref reason) if reason == "SAFETY"));
}

#[tokio::test]
async fn test_complete_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": { "code": 429, "message": "Resource has been exhausted" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).complete("anything").await.unwrap_err();

    assert!(err.to_string().contains("429"), "Error should mention 429 status: {}", err);
}
