use super::*;
use autofill_protocols::Credentials;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(key: &str) -> GenerationRequest {
    GenerationRequest::new("Fill the form", Credentials::new(key))
}

fn provider(server: &MockServer) -> AnthropicProvider {
    AnthropicProvider::default().with_base_url(server.uri())
}

#[test]
fn test_provider_identity() {
    let provider = AnthropicProvider::default();
    assert_eq!(provider.kind(), BackendKind::Anthropic);
    assert_eq!(provider.default_model(), "claude-3-5-haiku-latest");
}

#[tokio::test]
async fn test_generate_parses_tool_use() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-5-haiku-latest",
            "max_tokens": 4000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "content": [
                {"type": "text", "text": "Sure."},
                {"type": "tool_use", "id": "toolu_1", "name": "select_dropdown_option",
                 "input": {"selector": "//*[@id='country']", "value": "PT"}}
            ],
            "stop_reason": "tool_use"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let calls = provider(&server).generate(request("sk-ant")).await.unwrap();
    assert_eq!(calls, vec![ToolCall::select_option("//*[@id='country']", "PT")]);
}

#[tokio::test]
async fn test_generate_uses_requested_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"model": "claude-sonnet-4-0"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .expect(1)
        .mount(&server)
        .await;

    let calls = provider(&server)
        .generate(request("k").with_model("claude-sonnet-4-0"))
        .await
        .unwrap();
    assert!(calls.is_empty());
}

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = provider(&server).generate(request(" ")).await.unwrap_err();
    assert!(matches!(
        err,
        ProviderError::MissingCredential {
            provider: BackendKind::Anthropic
        }
    ));
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "12")
                .set_body_json(json!({"type": "error", "error": {"type": "rate_limit_error", "message": "slow down"}})),
        )
        .mount(&server)
        .await;

    let err = provider(&server).generate(request("k")).await.unwrap_err();
    match err {
        ProviderError::RateLimited { retry_delay, message, .. } => {
            assert_eq!(retry_delay.as_deref(), Some("12s"));
            assert!(message.ends_with("Recommended wait time: 12s."));
        }
        other => panic!("Expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&server)
        .await;

    let err = provider(&server).generate(request("bad")).await.unwrap_err();
    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid x-api-key");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider(&server).generate(request("k")).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}
