//! Relay endpoint handlers.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use relay_core::{
    check_document_type, AssetProvider, BinaryAsset, DocumentAnswer, DocumentQaPayload,
    ImageGenPayload, RelayError, ScreenshotPayload, VoiceoverPayload,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of a successful `/solve-pdf` call.
#[derive(Debug, Serialize)]
pub struct SolveResponse {
    pub success: bool,
    #[serde(flatten)]
    pub answer: DocumentAnswer,
}

/// Answer a question about an uploaded PDF.
///
/// The upload's declared type is checked before its bytes are read.
pub async fn solve_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SolveResponse>, ApiError> {
    if !state.gemini.is_configured() {
        return Err(RelayError::Configuration("GEMINI_API_KEY".to_string()).into());
    }

    let mut multipart = multipart?;
    let mut payload = DocumentQaPayload::default();
    let mut document: Option<(Bytes, String)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let mime_type = check_document_type(field.content_type())?;
                document = Some((field.bytes().await?, mime_type));
            }
            Some("question") => payload.question = Some(field.text().await?),
            Some("max_tokens") => payload.max_tokens = Some(field.text().await?),
            Some("temperature") => payload.temperature = Some(field.text().await?),
            _ => {}
        }
    }

    let (bytes, mime_type) =
        document.ok_or_else(|| RelayError::validation("file", "is required"))?;
    let request = payload.validate(bytes, mime_type, &state.document_defaults)?;

    let answer = state
        .gemini
        .answer(&request)
        .await
        .map_err(|e| RelayError::from_provider(relay_provider_gemini::SERVICE, e))?;

    info!(
        "Answered document question ({} tokens, model {})",
        answer.tokens_used, answer.model
    );
    Ok(Json(SolveResponse {
        success: true,
        answer,
    }))
}

/// Capture a web page as an image.
pub async fn screenshot(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScreenshotPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    if !state.screenshot.is_configured() {
        return Err(RelayError::Configuration("SCREENSHOTONE_KEY".to_string()).into());
    }

    let Json(payload) = payload?;
    let request = payload.validate(state.screenshot_size)?;
    relay(&state.screenshot, &request).await
}

/// Generate an image from a prompt.
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ImageGenPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let request = payload.validate(&state.image_defaults)?;
    relay(&state.images, &request).await
}

/// Synthesize speech from text.
pub async fn voiceover(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VoiceoverPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    if !state.voice.is_configured() {
        return Err(RelayError::Configuration("ELEVENLABS_API_KEY".to_string()).into());
    }

    let Json(payload) = payload?;
    let request = payload.validate(&state.voice_defaults)?;
    relay(&state.voice, &request).await
}

/// Fetch one asset from `provider` and hand it back as an attachment.
async fn relay<P: AssetProvider>(provider: &P, request: &P::Request) -> Result<Response, ApiError> {
    let asset = provider
        .fetch(request)
        .await
        .map_err(|e| RelayError::from_provider(provider.service(), e))?;

    info!(
        "{} returned {} bytes of {}",
        provider.service(),
        asset.len(),
        asset.media_type
    );
    Ok(attachment(asset, provider.file_stem()))
}

/// Raw bytes with `Content-Type` and an attachment `Content-Disposition`.
pub fn attachment(asset: BinaryAsset, stem: &str) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", asset.filename(stem));
    (
        [(CONTENT_TYPE, asset.media_type), (CONTENT_DISPOSITION, disposition)],
        asset.bytes,
    )
        .into_response()
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
