//! HTTP route definitions.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::monitoring;
use crate::state::AppState;

/// Create the router.
///
/// ```text
/// GET  /               - Service info
/// GET  /health         - Liveness and provider status
/// POST /cleanup        - Resident memory report
/// POST /solve-pdf      - PDF question answering (multipart)
/// POST /screenshot     - Web page screenshot (JSON in, PNG out)
/// POST /generate-image - Image generation (JSON in, image out)
/// POST /voiceover      - Text-to-speech (JSON in, MP3 out)
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let relay_routes = Router::new()
        .route("/solve-pdf", post(handlers::solve_pdf))
        .route("/screenshot", post(handlers::screenshot))
        .route("/generate-image", post(handlers::generate_image))
        .route("/voiceover", post(handlers::voiceover))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .with_state(state.clone());

    let monitoring_routes = Router::new()
        .route("/health", get(monitoring::health_check))
        .route("/cleanup", post(monitoring::cleanup))
        .with_state(state.clone());

    let info_route = Router::new().route("/", get(monitoring::service_info));

    Router::new()
        .merge(relay_routes)
        .merge(monitoring_routes)
        .merge(info_route)
        .layer(middleware::from_fn_with_state(state, count_requests))
        .layer(TraceLayer::new_for_http())
}

/// Count every handled request towards the recycling threshold.
async fn count_requests(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    state.record_request();
    response
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
