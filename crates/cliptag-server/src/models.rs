//! API request and response models.

use cliptag_core::ContentType;
use serde::{Deserialize, Serialize};

/// Request body for POST /api/analyze.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// The captured text to analyze.
    pub content: String,
}

/// Response body for POST /api/analyze.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Detected content type.
    pub content_type: ContentType,
    /// Keyword tags in detection order.
    pub tags: Vec<String>,
    /// Detected language, when the content type implies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Heuristic confidence in [0, 1]. Persisting clients that store an
    /// integer percentage scale this themselves.
    pub confidence: f32,
    /// Derived display title.
    pub title: String,
    /// Analysis latency in milliseconds.
    pub latency_ms: u64,
}

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
