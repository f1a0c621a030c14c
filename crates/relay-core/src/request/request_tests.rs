use super::*;
use crate::error::ErrorKind;
use bytes::Bytes;

fn field_of(err: RelayError) -> String {
    match err {
        RelayError::Validation { field, .. } => field,
        other => panic!("expected validation error, got {:?}", other),
    }
}

// --- document ---

#[test]
fn test_check_document_type_accepts_pdf() {
    assert_eq!(check_document_type(Some("application/pdf")).unwrap(), "application/pdf");
    assert_eq!(
        check_document_type(Some("Application/PDF; name=q.pdf")).unwrap(),
        "application/pdf"
    );
}

#[test]
fn test_check_document_type_rejects_others() {
    assert_eq!(field_of(check_document_type(Some("image/png")).unwrap_err()), "file");
    assert_eq!(field_of(check_document_type(Some("text/plain")).unwrap_err()), "file");
    assert_eq!(field_of(check_document_type(None).unwrap_err()), "file");
}

#[test]
fn test_document_payload_defaults() {
    let defaults = DocumentDefaults::default();
    let req = DocumentQaPayload::default()
        .validate(Bytes::from_static(b"%PDF-1.4"), PDF_MIME.to_string(), &defaults)
        .unwrap();
    assert_eq!(req.question, "Solve this JEE question step by step.");
    assert_eq!(req.max_tokens, 2048);
    assert!((req.temperature - 0.7).abs() < f32::EPSILON);
}

#[test]
fn test_document_payload_explicit_values() {
    let payload = DocumentQaPayload {
        question: Some("What is x?".to_string()),
        max_tokens: Some("512".to_string()),
        temperature: Some("0.2".to_string()),
    };
    let req = payload
        .validate(Bytes::from_static(b"%PDF"), PDF_MIME.to_string(), &DocumentDefaults::default())
        .unwrap();
    assert_eq!(req.question, "What is x?");
    assert_eq!(req.max_tokens, 512);
    assert!((req.temperature - 0.2).abs() < f32::EPSILON);
}

#[test]
fn test_document_payload_rejects_empty_document() {
    let err = DocumentQaPayload::default()
        .validate(Bytes::new(), PDF_MIME.to_string(), &DocumentDefaults::default())
        .unwrap_err();
    assert_eq!(field_of(err), "file");
}

#[test]
fn test_document_payload_rejects_bad_numbers() {
    let defaults = DocumentDefaults::default();
    let doc = Bytes::from_static(b"%PDF");

    let err = DocumentQaPayload {
        max_tokens: Some("lots".to_string()),
        ..Default::default()
    }
    .validate(doc.clone(), PDF_MIME.to_string(), &defaults)
    .unwrap_err();
    assert_eq!(field_of(err), "max_tokens");

    let err = DocumentQaPayload {
        max_tokens: Some("0".to_string()),
        ..Default::default()
    }
    .validate(doc.clone(), PDF_MIME.to_string(), &defaults)
    .unwrap_err();
    assert_eq!(field_of(err), "max_tokens");

    let err = DocumentQaPayload {
        temperature: Some("3.5".to_string()),
        ..Default::default()
    }
    .validate(doc, PDF_MIME.to_string(), &defaults)
    .unwrap_err();
    assert_eq!(field_of(err), "temperature");
}

// --- screenshot ---

fn screenshot_payload(url: &str) -> ScreenshotPayload {
    ScreenshotPayload {
        url: url.to_string(),
        width: None,
        height: None,
        full_page: false,
    }
}

#[test]
fn test_screenshot_defaults_from_config() {
    let req = screenshot_payload("https://example.com/page")
        .validate(Dimensions::new(1920, 1080))
        .unwrap();
    assert_eq!(req.url.as_str(), "https://example.com/page");
    assert_eq!((req.width, req.height), (1920, 1080));
    assert!(!req.full_page);

    let req = screenshot_payload("https://example.com")
        .validate(Dimensions::new(1280, 720))
        .unwrap();
    assert_eq!((req.width, req.height), (1280, 720));
}

#[test]
fn test_screenshot_rejects_relative_url() {
    let err = screenshot_payload("/just/a/path")
        .validate(Dimensions::new(1920, 1080))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationError);
    assert_eq!(field_of(err), "url");
}

#[test]
fn test_screenshot_rejects_non_http_scheme() {
    let err = screenshot_payload("ftp://example.com/file")
        .validate(Dimensions::new(1920, 1080))
        .unwrap_err();
    assert_eq!(field_of(err), "url");
}

#[test]
fn test_screenshot_rejects_zero_width() {
    let mut payload = screenshot_payload("https://example.com");
    payload.width = Some(0);
    let err = payload.validate(Dimensions::new(1920, 1080)).unwrap_err();
    assert_eq!(field_of(err), "width");
}

#[test]
fn test_screenshot_payload_deserialize() {
    let json = r#"{"url": "https://example.com", "width": 800, "full_page": true}"#;
    let payload: ScreenshotPayload = serde_json::from_str(json).unwrap();
    assert_eq!(payload.width, Some(800));
    assert!(payload.height.is_none());
    assert!(payload.full_page);
}

// --- image ---

#[test]
fn test_image_defaults() {
    let payload: ImageGenPayload = serde_json::from_str(r#"{"prompt": "a red fox"}"#).unwrap();
    let req = payload.validate(&ImageDefaults::default()).unwrap();
    assert_eq!(req.prompt, "a red fox");
    assert_eq!((req.width, req.height), (1024, 1024));
    assert_eq!(req.seed, None);
    assert_eq!(req.model, "flux");
}

#[test]
fn test_image_rejects_blank_prompt() {
    let payload: ImageGenPayload = serde_json::from_str(r#"{"prompt": "   "}"#).unwrap();
    let err = payload.validate(&ImageDefaults::default()).unwrap_err();
    assert_eq!(field_of(err), "prompt");
}

#[test]
fn test_image_rejects_oversized_height() {
    let payload: ImageGenPayload =
        serde_json::from_str(r#"{"prompt": "fox", "height": 100000}"#).unwrap();
    let err = payload.validate(&ImageDefaults::default()).unwrap_err();
    assert_eq!(field_of(err), "height");
}

#[test]
fn test_image_keeps_zero_seed() {
    let payload: ImageGenPayload = serde_json::from_str(r#"{"prompt": "fox", "seed": 0}"#).unwrap();
    let req = payload.validate(&ImageDefaults::default()).unwrap();
    assert_eq!(req.seed, Some(0));
}

// --- voice ---

#[test]
fn test_voice_defaults() {
    let payload: VoiceoverPayload = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
    let req = payload.validate(&VoiceDefaults::default()).unwrap();
    assert_eq!(req.voice_id, "21m00Tcm4TlvDq8ikWAM");
    assert_eq!(req.model_id, "eleven_multilingual_v2");
}

#[test]
fn test_voice_text_at_limit_is_accepted() {
    let payload = VoiceoverPayload {
        text: "a".repeat(5000),
        voice_id: None,
        model_id: None,
    };
    assert!(payload.validate(&VoiceDefaults::default()).is_ok());
}

#[test]
fn test_voice_text_over_limit_is_rejected() {
    let payload = VoiceoverPayload {
        text: "a".repeat(5001),
        voice_id: None,
        model_id: None,
    };
    let err = payload.validate(&VoiceDefaults::default()).unwrap_err();
    assert!(err.to_string().contains("max 5000"));
    assert_eq!(field_of(err), "text");
}

#[test]
fn test_voice_limit_counts_characters_not_bytes() {
    let defaults = VoiceDefaults {
        max_chars: 3,
        ..Default::default()
    };
    let payload = VoiceoverPayload {
        text: "héé".to_string(),
        voice_id: None,
        model_id: None,
    };
    assert!(payload.validate(&defaults).is_ok());
}

#[test]
fn test_voice_rejects_empty_text() {
    let payload = VoiceoverPayload {
        text: String::new(),
        voice_id: Some("custom".to_string()),
        model_id: None,
    };
    assert_eq!(field_of(payload.validate(&VoiceDefaults::default()).unwrap_err()), "text");
}
