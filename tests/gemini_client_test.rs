use nutrichat::config::GeminiConfig;
use nutrichat::error::AiError;
use nutrichat::gemini::{GeminiClient, ModelClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: "test-key".to_string(),
        api_base: base.to_string(),
        model: "gemini-2.5-flash".to_string(),
    }
}

#[test_log::test(tokio::test)]
async fn returns_the_generated_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Hello from the model" } ] } }
            ]
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(test_config(&server.uri()));
    let reply = client.send_prompt("hi").await.expect("request succeeds");
    assert_eq!(reply, "Hello from the model");
}

#[test_log::test(tokio::test)]
async fn sends_the_fixed_generation_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 1024
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "ok" } ] } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(test_config(&server.uri()));
    client.send_prompt("hi").await.expect("request succeeds");
}

#[test_log::test(tokio::test)]
async fn non_success_status_becomes_an_ai_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(test_config(&server.uri()));
    match client.send_prompt("hi").await {
        Err(AiError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "backend exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn empty_candidates_become_an_ai_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(test_config(&server.uri()));
    assert!(matches!(
        client.send_prompt("hi").await,
        Err(AiError::EmptyResponse)
    ));
}
