//! Content type classification for clipboard captures.
//!
//! This module inspects raw pasted text and infers what it is (a URL, a
//! code snippet, an email address, ...) along with keyword tags and a
//! heuristic confidence score.

mod content;
mod content_type;

pub use content::ContentClassifier;
pub use content_type::{Classification, ContentType, DEFAULT_CONFIDENCE};

pub(crate) use content::parse_json;
