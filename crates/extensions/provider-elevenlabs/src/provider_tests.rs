use super::*;

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MP3: &[u8] = &[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 1];

fn http() -> OutboundClient {
    OutboundClient::new(Duration::from_secs(5)).unwrap()
}

fn hello() -> VoiceoverRequest {
    VoiceoverRequest {
        text: "Hello there".to_string(),
        voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
        model_id: "eleven_multilingual_v2".to_string(),
    }
}

#[test]
fn test_speech_url() {
    let provider = ElevenLabsProvider::new(http(), Some("k".to_string()));
    let url = provider.speech_url("21m00Tcm4TlvDq8ikWAM").unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.elevenlabs.io/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"
    );
}

#[test]
fn test_speech_url_escapes_voice_id() {
    let provider = ElevenLabsProvider::new(http(), Some("k".to_string()));
    let url = provider.speech_url("../admin").unwrap();
    assert_eq!(url.path(), "/v1/text-to-speech/..%2Fadmin");
}

#[test]
fn test_build_body() {
    let provider = ElevenLabsProvider::new(http(), Some("k".to_string())).with_settings(
        VoiceSettings {
            stability: 0.3,
            similarity_boost: 0.9,
        },
    );
    let json = serde_json::to_value(provider.build_body(&hello())).unwrap();

    assert_eq!(json["text"], "Hello there");
    assert_eq!(json["model_id"], "eleven_multilingual_v2");
    assert!((json["voice_settings"]["stability"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    assert!((json["voice_settings"]["similarity_boost"].as_f64().unwrap() - 0.9).abs() < 1e-6);
}

#[tokio::test]
async fn test_fetch_audio() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
        .and(header("xi-api-key", "secret"))
        .and(header("accept", "audio/mpeg"))
        .and(body_json(serde_json::json!({
            "text": "Hello there",
            "model_id": "eleven_multilingual_v2",
            "voice_settings": {"stability": 0.5, "similarity_boost": 0.75}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(MP3),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = ElevenLabsProvider::new(http(), Some("secret".to_string()))
        .with_url(format!("{}/v1", server.uri()));
    let asset = provider.fetch(&hello()).await.unwrap();

    assert_eq!(asset.media_type, "audio/mpeg");
    assert_eq!(asset.bytes.as_ref(), MP3);
    assert_eq!(asset.filename(provider.file_stem()), "voiceover.mp3");
}

#[tokio::test]
async fn test_fetch_without_key_makes_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(MP3))
        .expect(0)
        .mount(&server)
        .await;

    let provider = ElevenLabsProvider::new(http(), None).with_url(format!("{}/v1", server.uri()));
    assert!(!provider.is_configured());

    let err = provider.fetch(&hello()).await.unwrap_err();
    assert!(matches!(err, ProviderError::NotConfigured(ref name) if name == "ELEVENLABS_API_KEY"));
}

#[tokio::test]
async fn test_fetch_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": {"status": "invalid_api_key", "message": "Invalid API key"}
        })))
        .mount(&server)
        .await;

    let provider = ElevenLabsProvider::new(http(), Some("bad".to_string()))
        .with_url(format!("{}/v1", server.uri()));
    let err = provider.fetch(&hello()).await.unwrap_err();
    match err {
        ProviderError::ApiError { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid_api_key"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_rejects_non_audio() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>maintenance</html>"),
        )
        .mount(&server)
        .await;

    let provider = ElevenLabsProvider::new(http(), Some("secret".to_string()))
        .with_url(format!("{}/v1", server.uri()));
    let err = provider.fetch(&hello()).await.unwrap_err();
    assert!(matches!(err, ProviderError::UnexpectedResponse(_)));
}
