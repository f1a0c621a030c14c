use super::*;

use bytes::Bytes;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http() -> OutboundClient {
    OutboundClient::new(Duration::from_secs(5)).unwrap()
}

fn sample_request() -> DocumentQaRequest {
    DocumentQaRequest {
        document: Bytes::from_static(b"%PDF-1.4 test"),
        mime_type: "application/pdf".to_string(),
        question: "What is x?".to_string(),
        max_tokens: 256,
        temperature: 0.2,
    }
}

fn provider(server: &MockServer) -> GeminiProvider {
    GeminiProvider::with_url(
        http(),
        Some("test-key".to_string()),
        server.uri(),
        Duration::from_secs(5),
    )
}

#[test]
fn test_build_request_question_then_inline_document() {
    let body = build_request(&sample_request());
    let json = serde_json::to_value(&body).unwrap();

    let parts = &json["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], "What is x?");
    assert_eq!(parts[1]["inline_data"]["mime_type"], "application/pdf");
    assert_eq!(
        parts[1]["inline_data"]["data"],
        STANDARD.encode(b"%PDF-1.4 test")
    );
    assert_eq!(json["contents"][0]["role"], "user");
    assert_eq!(json["generationConfig"]["maxOutputTokens"], 256);
}

#[test]
fn test_unconfigured_provider() {
    let provider = GeminiProvider::new(http(), None);
    assert!(!provider.is_configured());
    assert_eq!(provider.model(), "gemini-1.5-flash");

    let blank = GeminiProvider::new(http(), Some(String::new()));
    assert!(!blank.is_configured());
}

#[tokio::test]
async fn test_unconfigured_provider_fails_before_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = GeminiProvider::with_url(http(), None, server.uri(), Duration::from_secs(5));
    let err = provider.answer(&sample_request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::NotConfigured(ref name) if name == "GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_answer_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": {"maxOutputTokens": 256}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "x = 2"}, {"text": "Done."}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"totalTokenCount": 42}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = provider(&server).answer(&sample_request()).await.unwrap();
    assert_eq!(answer.answer, "x = 2\nDone.");
    assert_eq!(answer.model, "gemini-1.5-flash");
    assert_eq!(answer.tokens_used, 42);
}

#[tokio::test]
async fn test_answer_uses_configured_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = provider(&server)
        .with_model("gemini-2.0-flash")
        .answer(&sample_request())
        .await
        .unwrap();
    assert_eq!(answer.model, "gemini-2.0-flash");
    assert_eq!(answer.tokens_used, 0);
}

#[tokio::test]
async fn test_no_candidates_yields_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(&server)
        .await;

    let answer = provider(&server).answer(&sample_request()).await.unwrap();
    assert!(answer.is_no_answer());
    assert_eq!(answer.answer, "No answer generated");
}

#[tokio::test]
async fn test_candidate_without_parts_yields_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": []}, "finishReason": "SAFETY"}],
            "usageMetadata": {"totalTokenCount": 7}
        })))
        .mount(&server)
        .await;

    let answer = provider(&server).answer(&sample_request()).await.unwrap();
    assert!(answer.is_no_answer());
    assert_eq!(answer.tokens_used, 7);
}

#[tokio::test]
async fn test_undecodable_body_yields_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let answer = provider(&server).answer(&sample_request()).await.unwrap();
    assert!(answer.is_no_answer());
}

#[tokio::test]
async fn test_api_error_message_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&server)
        .await;

    let err = provider(&server).answer(&sample_request()).await.unwrap_err();
    match err {
        ProviderError::ApiError { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_api_error_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = provider(&server).answer(&sample_request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::ApiError { status: 503, .. }));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"candidates": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let provider = GeminiProvider::with_url(
        http(),
        Some("test-key".to_string()),
        server.uri(),
        Duration::from_millis(200),
    );
    let err = provider.answer(&sample_request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Timeout(_)));
}
