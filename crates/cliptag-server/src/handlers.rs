//! API route handlers.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use tracing::{debug, info};

use crate::error::{ApiError, Result};
use crate::models::{AnalyzeRequest, AnalyzeResponse, HealthResponse};
use crate::state::AppState;

/// POST /api/analyze - Classify a capture and derive its display title.
pub async fn analyze_content(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    if req.content.len() > state.max_content_len {
        return Err(ApiError::ContentTooLarge {
            size: req.content.len(),
            max: state.max_content_len,
        });
    }

    debug!(content_len = req.content.len(), "Analyzing capture");

    let start = Instant::now();
    let classification = state.classifier.classify(&req.content);
    let title = state.titles.generate(&req.content, &classification);
    let latency_ms = start.elapsed().as_millis() as u64;

    info!(
        content_type = classification.content_type.name(),
        tags = classification.tags.len(),
        latency_ms,
        "Capture analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        content_type: classification.content_type,
        tags: classification.tags,
        language: classification.language,
        confidence: classification.confidence,
        title,
        latency_ms,
    }))
}

/// GET /api/health - Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
