//! Content types and classification records.

use serde::{Deserialize, Serialize};

/// Confidence assigned when no detection rule matches and the content
/// falls through to the plain-text classification.
pub const DEFAULT_CONFIDENCE: f32 = 0.8;

/// Content types a clipboard capture can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// A web address.
    Url,
    /// Source code in some programming language.
    Code,
    /// An email address.
    Email,
    /// A phone number.
    Phone,
    /// Plain prose; the fallback when nothing else matches.
    Text,
    /// A parseable JSON document.
    Json,
    /// Markdown prose. Reserved for display logic; the detector reports
    /// markdown snippets as [`ContentType::Code`] with the language set.
    Markdown,
    /// A SQL statement.
    Sql,
    /// A shell command line.
    Command,
    /// A filesystem path.
    Path,
}

impl ContentType {
    /// Returns all available content types.
    pub fn all() -> &'static [ContentType] {
        &[
            ContentType::Url,
            ContentType::Code,
            ContentType::Email,
            ContentType::Phone,
            ContentType::Text,
            ContentType::Json,
            ContentType::Markdown,
            ContentType::Sql,
            ContentType::Command,
            ContentType::Path,
        ]
    }

    /// Returns the wire name for this content type.
    pub fn name(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Code => "code",
            ContentType::Email => "email",
            ContentType::Phone => "phone",
            ContentType::Text => "text",
            ContentType::Json => "json",
            ContentType::Markdown => "markdown",
            ContentType::Sql => "sql",
            ContentType::Command => "command",
            ContentType::Path => "path",
        }
    }
}

/// Result of classifying a clipboard capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The detected content type.
    pub content_type: ContentType,
    /// Keyword tags in detection order.
    pub tags: Vec<String>,
    /// Detected programming or markup language, when the content type
    /// implies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Confidence score (0.0 to 1.0) for the detected content type.
    pub confidence: f32,
}

impl Classification {
    /// Creates a new classification, clamping confidence to [0, 1].
    pub fn new(content_type: ContentType, tags: Vec<String>, confidence: f32) -> Self {
        Self {
            content_type,
            tags,
            language: None,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Sets the detected language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Creates the fallback plain-text classification.
    pub fn text(tags: Vec<String>) -> Self {
        Self::new(ContentType::Text, tags, DEFAULT_CONFIDENCE)
    }
}
