//! Application state for the API server.

use std::sync::Arc;

use cliptag_core::{ContentClassifier, TitleGenerator};

/// Shared application state.
///
/// The classifier and title generator are immutable once built, so they
/// are shared across handlers without locks.
#[derive(Clone)]
pub struct AppState {
    /// Content classifier.
    pub classifier: Arc<ContentClassifier>,
    /// Title generator.
    pub titles: Arc<TitleGenerator>,
    /// Maximum accepted request content size in bytes.
    pub max_content_len: usize,
}

impl AppState {
    /// Creates a new application state with the given content size limit.
    pub fn new(max_content_len: usize) -> Self {
        Self {
            classifier: Arc::new(ContentClassifier::new()),
            titles: Arc::new(TitleGenerator::new()),
            max_content_len,
        }
    }
}
