//! Waterfall content-type detector.
//!
//! Detection rules run in a fixed order and the first matching rule wins.
//! The ordering is load-bearing: a capture containing both a URL and a code
//! fragment must classify as a URL because the URL rule runs first.

use regex::Regex;
use serde_json::Value;

use super::{Classification, ContentType};

/// Substring hints applied to the first matched URL. Rows are not mutually
/// exclusive; every matching row appends its tags.
const URL_HINTS: &[(&[&str], &[&str])] = &[
    (&["github.com"], &["github", "repository"]),
    (&["stackoverflow.com"], &["stackoverflow", "help"]),
    (&["youtube.com", "youtu.be"], &["youtube", "video"]),
    (&["docs.", "documentation"], &["documentation"]),
    (&["api."], &["api"]),
];

/// Keyword hints scanned over lowercased plain text. Non-exclusive: every
/// matching row appends its tags.
const TEXT_HINTS: &[(&[&str], &[&str])] = &[
    (&["api", "endpoint"], &["api", "technical"]),
    (&["error", "exception"], &["error", "debugging"]),
    (&["config", "setting"], &["configuration"]),
    (&["todo", "fixme"], &["todo", "task"]),
    (&["meeting", "agenda"], &["meeting", "notes"]),
    (&["password", "secret"], &["credentials", "sensitive"]),
];

/// File extension groups for path captures.
const EXTENSION_GROUPS: &[(&[&str], &str)] = &[
    (&["js", "ts", "jsx", "tsx"], "javascript"),
    (&["py", "ipynb"], "python"),
    (&["html", "css", "scss"], "web"),
    (&["jpg", "png", "gif", "svg"], "image"),
    (&["mp4", "mov", "avi"], "video"),
    (&["pdf", "doc", "docx"], "document"),
];

/// Phone candidates at or above this length are treated as prose that
/// happens to contain digits, not as a phone number.
const PHONE_MAX_LEN: usize = 50;

/// Path candidates at or above this length are treated as prose.
const PATH_MAX_LEN: usize = 200;

/// Fraction of code-looking lines above which multi-line content is
/// classified as code.
const CODE_LINE_RATIO: f32 = 0.3;

/// Captures longer than this are tagged `long-form`.
const LONG_FORM_MIN_LEN: usize = 500;

/// Captures shorter than this are tagged `short`.
const SHORT_MAX_LEN: usize = 50;

/// Captures with more words than this are tagged `article`.
const ARTICLE_MIN_WORDS: usize = 100;

/// One entry of the ordered code-pattern table. The first entry whose
/// regex matches decides the result; later entries are never consulted.
struct CodePattern {
    regex: Regex,
    language: &'static str,
    tags: &'static [&'static str],
    content_type: ContentType,
}

/// Rule-based detector for clipboard content types.
///
/// All patterns are compiled once at construction. Classification itself is
/// a pure function of the input text with no I/O and no shared state;
/// unparseable or degenerate input falls through to the plain-text
/// classification instead of failing.
pub struct ContentClassifier {
    url: Regex,
    email: Regex,
    phone: Regex,
    path: Regex,
    extension: Regex,
    code_patterns: Vec<CodePattern>,
    line_indicators: Vec<Regex>,
}

impl ContentClassifier {
    /// Creates a new classifier with the default pattern tables.
    pub fn new() -> Self {
        Self {
            url: Regex::new(r"(?i)(https?://\S+)|(www\.\S+)").expect("Invalid URL pattern"),
            email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .expect("Invalid email pattern"),
            phone: Regex::new(r"\+?[\d\s()-]{10,}").expect("Invalid phone pattern"),
            path: Regex::new(r"([A-Za-z]:)?[/\\][\w\s/\\.-]+|[\w.-]+/[\w\s/.-]+")
                .expect("Invalid path pattern"),
            extension: Regex::new(r"\.(\w+)$").expect("Invalid extension pattern"),
            code_patterns: Self::build_code_patterns(),
            line_indicators: Self::build_line_indicators(),
        }
    }

    /// Classifies the given capture.
    ///
    /// Deterministic and total: identical input yields an identical result,
    /// and every input (including empty or whitespace-only text) produces
    /// a classification with a confidence in [0, 1].
    pub fn classify(&self, content: &str) -> Classification {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Classification::text(Vec::new());
        }

        self.detect_url(trimmed)
            .or_else(|| self.detect_email(trimmed))
            .or_else(|| self.detect_phone(trimmed))
            .or_else(|| detect_json(trimmed))
            .or_else(|| self.detect_code(trimmed))
            .or_else(|| self.detect_path(trimmed))
            .or_else(|| self.detect_code_lines(trimmed))
            .unwrap_or_else(|| classify_text(trimmed))
    }

    fn detect_url(&self, trimmed: &str) -> Option<Classification> {
        let first = self.url.find(trimmed)?;
        let mut tags = tag_vec(&["url", "link"]);

        // Secondary tags keyed off the first URL only.
        let url = first.as_str().to_lowercase();
        for (needles, hint_tags) in URL_HINTS {
            if needles.iter().any(|n| url.contains(n)) {
                tags.extend(tag_vec(hint_tags));
            }
        }

        Some(Classification::new(ContentType::Url, tags, 0.95))
    }

    fn detect_email(&self, trimmed: &str) -> Option<Classification> {
        if !self.email.is_match(trimmed) {
            return None;
        }
        Some(Classification::new(
            ContentType::Email,
            tag_vec(&["email", "contact"]),
            0.95,
        ))
    }

    fn detect_phone(&self, trimmed: &str) -> Option<Classification> {
        if !self.phone.is_match(trimmed) || trimmed.chars().count() >= PHONE_MAX_LEN {
            return None;
        }
        Some(Classification::new(
            ContentType::Phone,
            tag_vec(&["phone", "contact"]),
            0.9,
        ))
    }

    fn detect_code(&self, trimmed: &str) -> Option<Classification> {
        let pattern = self
            .code_patterns
            .iter()
            .find(|p| p.regex.is_match(trimmed))?;
        Some(
            Classification::new(pattern.content_type, tag_vec(pattern.tags), 0.9)
                .with_language(pattern.language),
        )
    }

    fn detect_path(&self, trimmed: &str) -> Option<Classification> {
        if !self.path.is_match(trimmed) || trimmed.chars().count() >= PATH_MAX_LEN {
            return None;
        }
        let mut tags = tag_vec(&["path", "file"]);

        if let Some(caps) = self.extension.captures(trimmed) {
            let ext = caps[1].to_lowercase();
            tags.push(format!("{ext}-file"));
            for (exts, group) in EXTENSION_GROUPS {
                if exts.contains(&ext.as_str()) {
                    tags.push((*group).to_string());
                }
            }
        }

        Some(Classification::new(ContentType::Path, tags, 0.8))
    }

    /// Multi-line fallback: content where enough lines look like code is
    /// classified as code even when no single-language pattern matched.
    fn detect_code_lines(&self, trimmed: &str) -> Option<Classification> {
        let lines: Vec<&str> = trimmed.split('\n').collect();
        if lines.len() < 2 {
            return None;
        }

        let code_lines = lines
            .iter()
            .filter(|line| self.line_indicators.iter().any(|r| r.is_match(line)))
            .count();

        if code_lines as f32 / lines.len() as f32 <= CODE_LINE_RATIO {
            return None;
        }

        Some(Classification::new(
            ContentType::Code,
            tag_vec(&["code", "multi-line"]),
            0.85,
        ))
    }

    fn build_code_patterns() -> Vec<CodePattern> {
        // Table order matters: the first matching entry wins. SQL and shell
        // entries override the content type; everything else stays `code`.
        let entries: &[(&str, &'static str, &'static [&'static str], ContentType)] = &[
            (
                r"(?i)(function\s+\w+|const\s+\w+\s*=|=>|import\s+.*from|export\s+)",
                "javascript",
                &["javascript", "code"],
                ContentType::Code,
            ),
            (
                r"(?i)(interface\s+\w+|type\s+\w+\s*=|as\s+\w+)",
                "typescript",
                &["typescript", "code"],
                ContentType::Code,
            ),
            (
                r"(?i)(def\s+\w+|import\s+\w+|from\s+\w+\s+import|if\s+__name__|print\()",
                "python",
                &["python", "code"],
                ContentType::Code,
            ),
            (
                r"(?i)(public\s+class|private\s+\w+|System\.out\.println|Console\.WriteLine)",
                "java",
                &["java", "code"],
                ContentType::Code,
            ),
            (
                r"(?i)(SELECT\s+.*FROM|INSERT\s+INTO|UPDATE\s+.*SET|DELETE\s+FROM|CREATE\s+TABLE)",
                "sql",
                &["sql", "database", "query"],
                ContentType::Sql,
            ),
            (
                r"(?i)(</?\w+[^>]*>|@media|\.[\w-]+\s*\{)",
                "html",
                &["html", "css", "web"],
                ContentType::Code,
            ),
            (
                r"(?i)(sudo\s+|npm\s+|git\s+|cd\s+|ls\s+|mkdir\s+|bash)",
                "bash",
                &["bash", "shell", "command"],
                ContentType::Command,
            ),
            (
                r"(?i)(FROM\s+\w+|RUN\s+|COPY\s+|WORKDIR\s+)",
                "dockerfile",
                &["docker", "container"],
                ContentType::Code,
            ),
            (
                r"(?m)(^#{1,6}\s+|^\*\s+|\[.*\]\(.*\)|```)",
                "markdown",
                &["markdown", "documentation"],
                ContentType::Code,
            ),
        ];

        entries
            .iter()
            .copied()
            .map(|(pattern, language, tags, content_type)| CodePattern {
                regex: Regex::new(pattern).expect("Invalid code pattern"),
                language,
                tags,
                content_type,
            })
            .collect()
    }

    fn build_line_indicators() -> Vec<Regex> {
        [
            r"^\s*//",
            r"^\s*/\*",
            r"^\s*#",
            r"^\s*<!--",
            r"\{\s*$",
            r";\s*$",
            r"^\s*(public|private|protected|static|const|let|var|function|class|interface|type)\s+",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid line indicator pattern"))
        .collect()
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Attempts to parse the whole capture as a JSON document. A parse failure
/// means the rule did not match; the error itself is never surfaced.
pub(crate) fn parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

fn detect_json(trimmed: &str) -> Option<Classification> {
    parse_json(trimmed)?;
    Some(Classification::new(
        ContentType::Json,
        tag_vec(&["json", "data", "structured"]),
        0.95,
    ))
}

fn classify_text(trimmed: &str) -> Classification {
    let mut tags = Vec::new();

    let lower = trimmed.to_lowercase();
    for (needles, hint_tags) in TEXT_HINTS {
        if needles.iter().any(|n| lower.contains(n)) {
            tags.extend(tag_vec(hint_tags));
        }
    }

    let char_count = trimmed.chars().count();
    if char_count > LONG_FORM_MIN_LEN {
        tags.push("long-form".to_string());
    } else if char_count < SHORT_MAX_LEN {
        tags.push("short".to_string());
    }

    if trimmed.split_whitespace().count() > ARTICLE_MIN_WORDS {
        tags.extend(tag_vec(&["article", "detailed"]));
    }

    Classification::text(tags)
}

fn tag_vec(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| (*t).to_string()).collect()
}
