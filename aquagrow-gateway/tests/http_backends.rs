//! Wire-level tests for the HTTP backends against a mock server.

use aquagrow_gateway::{
    CompletionRequest, ContentGateway, GatewayError, GeminiBackend, LlmBackend, LlmError,
    ObjectShape, OpenAiBackend, ResultShape,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn faq_shape() -> ResultShape {
    ResultShape::Array(ObjectShape::new().string("question", None).string("answer", None))
}

#[tokio::test]
async fn test_gemini_sends_schema_and_reads_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {"type": "ARRAY"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "[{\"question\": \"q\", \"answer\": \"a\"}]"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 40, "candidatesTokenCount": 12}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(server.uri(), "gemini-2.5-flash", "test-key").unwrap();
    let response = backend
        .complete(CompletionRequest::user("Generate FAQs").with_result_shape("faqs", faq_shape()))
        .await
        .unwrap();

    assert_eq!(response.content, r#"[{"question": "q", "answer": "a"}]"#);
    assert_eq!(response.usage.total(), 52);
}

#[tokio::test]
async fn test_gemini_blocked_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(server.uri(), "gemini-2.5-flash", "k").unwrap();
    let err = backend
        .complete(CompletionRequest::user("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::ContentFiltered { reason } if reason == "SAFETY"));
}

#[tokio::test]
async fn test_gemini_http_error_becomes_generation_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(server.uri(), "gemini-2.5-flash", "bad").unwrap();
    let gateway = ContentGateway::new(Arc::new(backend));

    let err = gateway.faqs().await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::GenerationFailed {
            source: LlmError::RequestFailed(_)
        }
    ));
    assert!(err.to_string().contains("API key not valid"));
}

#[tokio::test]
async fn test_gemini_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({"candidates": []})),
        )
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(server.uri(), "gemini-2.5-flash", "k")
        .unwrap()
        .with_timeout(Duration::from_millis(100));

    let err = backend.complete(CompletionRequest::user("x")).await.unwrap_err();
    assert!(matches!(err, LlmError::NetworkError(_)));
}

#[tokio::test]
async fn test_gemini_token_limit_reported_as_truncation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "[{\"question\": \"Do I"}]},
                "finishReason": "MAX_TOKENS"
            }]
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(server.uri(), "gemini-2.5-flash", "k").unwrap();
    let gateway = ContentGateway::new(Arc::new(backend));

    assert!(matches!(
        gateway.faqs().await,
        Err(GatewayError::Truncated { .. })
    ));
}

#[tokio::test]
async fn test_openai_unwraps_array_shapes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "response_format": {"type": "json_schema", "json_schema": {"name": "faqs", "strict": true}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "{\"items\": [{\"question\": \"q\", \"answer\": \"a\"}]}"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend =
        OpenAiBackend::new(server.uri(), "gpt-4o-mini", Some("sk-test".to_string())).unwrap();
    let response = backend
        .complete(CompletionRequest::user("Generate FAQs").with_result_shape("faqs", faq_shape()))
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&response.content).unwrap();
    assert_eq!(value, json!([{"question": "q", "answer": "a"}]));
}

#[tokio::test]
async fn test_openai_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let backend = OpenAiBackend::new(server.uri(), "gpt-4o-mini", None).unwrap();
    let err = backend.complete(CompletionRequest::user("x")).await.unwrap_err();
    assert!(matches!(err, LlmError::RateLimited { .. }));
}

#[tokio::test]
async fn test_backend_reachability() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let up = OpenAiBackend::new(server.uri(), "m", None).unwrap();
    assert!(up.is_available().await);

    let down = GeminiBackend::new(server.uri(), "missing-model", "k").unwrap();
    assert!(!down.is_available().await);
}
