//! Service info, health and memory report handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use relay_provider_screenshot::CaptureMode;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "relay-worker";

/// Relay endpoints as `(method, path, description)`.
pub const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("POST", "/solve-pdf", "Answer a question about an uploaded PDF"),
    ("POST", "/screenshot", "Capture a web page as PNG"),
    ("POST", "/generate-image", "Generate an image from a prompt"),
    ("POST", "/voiceover", "Synthesize speech from text"),
    ("GET", "/health", "Liveness and provider status"),
    ("POST", "/cleanup", "Report resident memory"),
];

/// Health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every provider is usable.
    Healthy,
    /// Some endpoints will refuse requests or use a fallback.
    Degraded,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub requests_handled: u64,
    pub endpoints: Vec<String>,
    pub providers: Vec<ComponentHealth>,
}

/// Provider status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    fn healthy(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Healthy,
            message: None,
        }
    }

    fn degraded(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Degraded,
            message: Some(message.into()),
        }
    }
}

/// Liveness check. Always answers 200; missing credentials only degrade the status.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let providers = vec![
        if state.gemini.is_configured() {
            ComponentHealth::healthy("gemini")
        } else {
            ComponentHealth::degraded("gemini", "GEMINI_API_KEY not configured")
        },
        match state.screenshot.mode() {
            Some(CaptureMode::Keyed) => ComponentHealth::healthy("screenshot"),
            Some(CaptureMode::Demo) => {
                ComponentHealth::degraded("screenshot", "using rate-limited demo provider")
            }
            None => ComponentHealth::degraded("screenshot", "SCREENSHOTONE_KEY not configured"),
        },
        ComponentHealth::healthy("pollinations"),
        if state.voice.is_configured() {
            ComponentHealth::healthy("elevenlabs")
        } else {
            ComponentHealth::degraded("elevenlabs", "ELEVENLABS_API_KEY not configured")
        },
    ];

    let status = if providers.iter().any(|c| c.status == HealthStatus::Degraded) {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    Json(HealthResponse {
        status,
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
        requests_handled: state.request_count(),
        endpoints: ENDPOINTS.iter().map(|(_, path, _)| path.to_string()).collect(),
        providers,
    })
}

/// Service info.
pub async fn service_info() -> Json<serde_json::Value> {
    let endpoints: Vec<serde_json::Value> = ENDPOINTS
        .iter()
        .map(|(method, path, description)| {
            serde_json::json!({
                "method": method,
                "path": path,
                "description": description,
            })
        })
        .collect();

    Json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Relay for document QA, screenshots, image generation and voiceover",
        "health": "/health",
        "endpoints": endpoints,
    }))
}

/// Memory report response.
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub memory_mb: Option<f64>,
    pub requests_handled: u64,
    pub message: String,
}

/// Report resident memory.
pub async fn cleanup(State(state): State<Arc<AppState>>) -> Json<CleanupResponse> {
    let memory_mb = get_memory_usage().map(|bytes| {
        let mb = bytes as f64 / (1024.0 * 1024.0);
        (mb * 100.0).round() / 100.0
    });
    info!("Memory report: {:?} MB resident", memory_mb);

    Json(CleanupResponse {
        success: true,
        memory_mb,
        requests_handled: state.request_count(),
        message: "No request state is retained".to_string(),
    })
}

/// Resident set size in bytes (Linux only).
fn get_memory_usage() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        if let Ok(statm) = std::fs::read_to_string("/proc/self/statm") {
            let parts: Vec<&str> = statm.split_whitespace().collect();
            if let Some(rss) = parts.get(1) {
                if let Ok(pages) = rss.parse::<u64>() {
                    return Some(pages * 4096);
                }
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "monitoring_tests.rs"]
mod tests;
