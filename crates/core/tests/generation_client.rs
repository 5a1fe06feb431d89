use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use konspekt_core::{AzureOpenAiClient, GenerationConfig, KonspektError, TextGenerator};

fn config(endpoint: &str) -> GenerationConfig {
    GenerationConfig {
        endpoint: endpoint.to_string(),
        deployment: "gpt-4o".to_string(),
        api_version: "2024-09-01-preview".to_string(),
        api_key: "test-key".to_string(),
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn returns_trimmed_text_of_the_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt-4o/chat/completions"))
        .and(query_param("api-version", "2024-09-01-preview"))
        .and(header("api-key", "test-key"))
        .and(body_partial_json(json!({"max_tokens": 500, "temperature": 0.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "  Head: H\nTitle: T  "}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(config(&server.uri())).unwrap();
    let text = client.generate("summarize this", 500, 0.5).await.unwrap();

    assert_eq!(text, "Head: H\nTitle: T");
}

#[tokio::test]
async fn non_success_status_is_a_generation_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(config(&server.uri())).unwrap();
    let err = client.generate("prompt", 100, 0.3).await.unwrap_err();

    match err {
        KonspektError::GenerationFailed { reason, .. } => {
            assert!(reason.contains("429"), "reason was: {reason}");
        }
        other => panic!("expected GenerationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn body_without_completion_text_is_a_generation_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(config(&server.uri())).unwrap();
    let err = client.generate("prompt", 100, 0.3).await.unwrap_err();

    assert!(matches!(err, KonspektError::GenerationFailed { .. }));
}
