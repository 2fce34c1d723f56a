//! HTTP mock tests for the Gemini `generateContent` adapter.

use reqwest::Url;
use secrecy::SecretString;
use serde_json::Value;
use wayfarer_gateway::inference::{
    ApiStyle, GatewayError, GeminiAdapter, GenerationRequest, ProviderAdapter, ProviderProfile,
    Role, JSON_MODE_INSTRUCTION,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn create_profile(server: &MockServer) -> ProviderProfile {
    ProviderProfile::new(
        "gemini",
        ApiStyle::GeminiGenerateContent,
        Url::parse(&format!("{}/v1beta", server.uri())).unwrap(),
        "gemini-2.0-flash",
    )
    .with_credential(SecretString::new("gemini-key".into()))
}

fn create_test_request() -> GenerationRequest {
    GenerationRequest::with_message("gemini", "Suggest a museum in Madrid")
}

async fn mount_ok(server: &MockServer, body: &str) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

async fn sent_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    serde_json::from_slice(&requests[0].body).unwrap()
}

#[tokio::test]
async fn test_candidate_parts_are_concatenated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "gemini-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "candidates": [
                    {"content": {"role": "model", "parts": [{"text": "The Prado, "}, {"text": "open 10-20h."}]},
                     "finishReason": "STOP"}
                ],
                "usageMetadata": {"promptTokenCount": 7, "candidatesTokenCount": 5}
            }"#,
        ))
        .mount(&server)
        .await;

    let result = GeminiAdapter::new()
        .send(&create_test_request(), &create_profile(&server))
        .await
        .unwrap();

    assert_eq!(result.content, "The Prado, open 10-20h.");
    assert_eq!(result.total_tokens(), Some(12));
}

#[tokio::test]
async fn test_request_envelope_uses_contents_and_parts() {
    let server = MockServer::start().await;
    mount_ok(&server, r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#).await;

    let request = GenerationRequest::new("gemini", vec![])
        .add_message(Role::System, "You are a travel planner.")
        .add_message(Role::User, "Day one?")
        .add_message(Role::Assistant, "Retiro park.")
        .add_message(Role::User, "Day two?")
        .with_max_output_tokens(256);

    GeminiAdapter::new()
        .send(&request, &create_profile(&server))
        .await
        .unwrap();

    let body = sent_body(&server).await;
    assert_eq!(
        body["systemInstruction"]["parts"][0]["text"],
        "You are a travel planner."
    );
    let contents = body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0]["role"], "user");
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[1]["parts"][0]["text"], "Retiro park.");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
    assert!(body["generationConfig"].get("responseMimeType").is_none());
}

#[tokio::test]
async fn test_native_json_mode_sets_mime_type() {
    let server = MockServer::start().await;
    mount_ok(&server, r#"{"candidates":[{"content":{"parts":[{"text":"{}"}]}}]}"#).await;

    let profile = create_profile(&server).with_native_json_mode(true);
    GeminiAdapter::new()
        .send(&create_test_request().with_json_mode(true), &profile)
        .await
        .unwrap();

    let body = sent_body(&server).await;
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert!(body.get("systemInstruction").is_none());
}

#[tokio::test]
async fn test_json_mode_without_native_support_uses_system_instruction() {
    let server = MockServer::start().await;
    mount_ok(&server, r#"{"candidates":[{"content":{"parts":[{"text":"{}"}]}}]}"#).await;

    GeminiAdapter::new()
        .send(&create_test_request().with_json_mode(true), &create_profile(&server))
        .await
        .unwrap();

    let body = sent_body(&server).await;
    assert_eq!(
        body["systemInstruction"]["parts"][0]["text"],
        JSON_MODE_INSTRUCTION
    );
}

#[tokio::test]
async fn test_model_resource_prefix_is_accepted() {
    let server = MockServer::start().await;
    mount_ok(&server, r#"{"candidates":[{"content":{"parts":[{"text":"hola"}]}}]}"#).await;

    let result = GeminiAdapter::new()
        .send(
            &create_test_request().with_model("models/gemini-2.0-flash"),
            &create_profile(&server),
        )
        .await
        .unwrap();

    assert_eq!(result.content, "hola");
}

#[tokio::test]
async fn test_unsupported_model_is_model_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-0.1:generateContent"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"error":{"code":400,"message":"models/gemini-0.1 is not found for API version v1beta"}}"#,
        ))
        .mount(&server)
        .await;

    let err = GeminiAdapter::new()
        .send(
            &create_test_request().with_model("gemini-0.1"),
            &create_profile(&server),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::ModelUnavailable { .. }));
}

#[tokio::test]
async fn test_resource_exhausted_is_quota_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string(
            r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED","message":"Quota exceeded"}}"#,
        ))
        .mount(&server)
        .await;

    let err = GeminiAdapter::new()
        .send(&create_test_request(), &create_profile(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::QuotaExhausted(_)));
}

#[tokio::test]
async fn test_blocked_candidate_is_transient() {
    let server = MockServer::start().await;
    mount_ok(&server, r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).await;

    let err = GeminiAdapter::new()
        .send(&create_test_request(), &create_profile(&server))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert!(err.to_string().contains("SAFETY"));
}
