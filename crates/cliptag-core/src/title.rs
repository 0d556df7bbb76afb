//! Display title derivation for classified captures.
//!
//! Titles are short human-readable labels shown in list views. Every
//! branch has an explicit fallback, so the generator never fails and
//! always returns a non-empty, bounded string.

use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::classifier::{parse_json, Classification, ContentType};

/// Title used when plain text yields no usable sentence or words.
const FALLBACK_TITLE: &str = "Untitled";

/// Derives display titles from a capture and its classification.
pub struct TitleGenerator {
    email: Regex,
    sql_verb: Regex,
}

impl TitleGenerator {
    /// Creates a new title generator.
    pub fn new() -> Self {
        Self {
            email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .expect("Invalid email pattern"),
            sql_verb: Regex::new(r"(?i)(SELECT|INSERT|UPDATE|DELETE|CREATE)")
                .expect("Invalid SQL verb pattern"),
        }
    }

    /// Generates a display title for the capture.
    ///
    /// Pure function of its inputs; parse failures inside a branch fall
    /// back to a generic label instead of propagating.
    pub fn generate(&self, content: &str, classification: &Classification) -> String {
        let trimmed = content.trim();

        match classification.content_type {
            ContentType::Url => url_title(trimmed),
            ContentType::Code => code_title(trimmed, classification.language.as_deref()),
            ContentType::Email => self.email_title(trimmed),
            ContentType::Phone => format!("Phone: {}", truncate_chars(trimmed, 20)),
            ContentType::Json => json_title(trimmed),
            ContentType::Sql => self.sql_title(trimmed),
            ContentType::Command => {
                let command = trimmed.split_whitespace().next().unwrap_or_default();
                format!("Command: {command}")
            }
            ContentType::Path => path_title(trimmed),
            ContentType::Text | ContentType::Markdown => prose_title(trimmed),
        }
    }

    fn email_title(&self, trimmed: &str) -> String {
        match self.email.find(trimmed) {
            Some(address) => format!("Email: {}", address.as_str()),
            None => "Email: Contact".to_string(),
        }
    }

    fn sql_title(&self, trimmed: &str) -> String {
        match self.sql_verb.find(trimmed) {
            Some(verb) => format!("SQL {}", verb.as_str().to_uppercase()),
            None => "SQL Query".to_string(),
        }
    }
}

impl Default for TitleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn url_title(trimmed: &str) -> String {
    match Url::parse(trimmed).ok().and_then(|u| u.host_str().map(str::to_owned)) {
        Some(host) => format!("Link: {host}"),
        None => format!("Link: {}...", truncate_chars(trimmed, 50)),
    }
}

fn code_title(trimmed: &str, language: Option<&str>) -> String {
    let first_line = trimmed.lines().next().unwrap_or_default().trim();
    let snippet = truncate_chars(first_line, 40);
    match language {
        Some(language) => format!("{}: {snippet}...", language.to_uppercase()),
        None => format!("Code: {snippet}..."),
    }
}

fn json_title(trimmed: &str) -> String {
    match parse_json(trimmed) {
        Some(Value::Object(map)) => {
            let keys: Vec<&str> = map.keys().take(3).map(String::as_str).collect();
            format!("JSON: {}", keys.join(", "))
        }
        _ => "JSON Data".to_string(),
    }
}

fn path_title(trimmed: &str) -> String {
    let name = trimmed.rsplit(['/', '\\']).next().unwrap_or_default();
    if name.is_empty() {
        "Path: File".to_string()
    } else {
        format!("Path: {name}")
    }
}

/// Plain text: prefer the first sentence when it is title-sized, otherwise
/// fall back to the leading words.
fn prose_title(trimmed: &str) -> String {
    let first_sentence = trimmed
        .split(['.', '!', '?'])
        .next()
        .unwrap_or_default()
        .trim();

    let sentence_len = first_sentence.chars().count();
    if sentence_len > 5 && sentence_len < 60 {
        return first_sentence.to_string();
    }

    let words: Vec<&str> = trimmed.split_whitespace().take(8).collect();
    let joined = words.join(" ");
    if joined.is_empty() {
        FALLBACK_TITLE.to_string()
    } else if joined.chars().count() > 50 {
        format!("{}...", truncate_chars(&joined, 47))
    } else {
        joined
    }
}

/// Char-boundary-safe prefix of at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ContentClassifier;

    fn generate(content: &str) -> String {
        let classifier = ContentClassifier::new();
        let titles = TitleGenerator::new();
        let classification = classifier.classify(content);
        titles.generate(content, &classification)
    }

    // === URL Titles ===

    #[test]
    fn url_title_uses_hostname() {
        assert_eq!(
            generate("https://github.com/rust-lang/rust"),
            "Link: github.com"
        );
    }

    #[test]
    fn unparseable_url_falls_back_to_prefix() {
        assert_eq!(generate("www.example.com"), "Link: www.example.com...");
    }

    // === Code Titles ===

    #[test]
    fn code_title_prefixes_uppercased_language() {
        assert_eq!(
            generate("const total = 5;\nmore code"),
            "JAVASCRIPT: const total = 5;..."
        );
    }

    #[test]
    fn code_title_without_language_uses_generic_prefix() {
        // Multi-line heuristic match carries no language.
        let title = generate("int x = 1;\nint y = 2;\nint z = 3;");
        assert_eq!(title, "Code: int x = 1;...");
    }

    #[test]
    fn code_title_truncates_long_first_line() {
        let content = format!("const value = \"{}\";", "x".repeat(60));
        let title = generate(&content);
        assert!(title.starts_with("JAVASCRIPT: "));
        assert!(title.ends_with("..."));
        // Prefix plus at most 40 snippet chars plus ellipsis.
        assert!(title.chars().count() <= "JAVASCRIPT: ".len() + 43);
    }

    // === Email Titles ===

    #[test]
    fn email_title_extracts_address() {
        assert_eq!(
            generate("reach me at jane.doe@corp.io"),
            "Email: jane.doe@corp.io"
        );
    }

    #[test]
    fn email_title_falls_back_without_address() {
        let titles = TitleGenerator::new();
        let classification = Classification::new(ContentType::Email, vec![], 0.95);
        assert_eq!(
            titles.generate("no address here", &classification),
            "Email: Contact"
        );
    }

    // === Phone Titles ===

    #[test]
    fn phone_title_keeps_leading_digits() {
        assert_eq!(generate("+1 (555) 123-4567"), "Phone: +1 (555) 123-4567");
    }

    // === JSON Titles ===

    #[test]
    fn json_title_lists_first_three_keys() {
        assert_eq!(generate(r#"{"a":1,"b":2}"#), "JSON: a, b");
        assert_eq!(
            generate(r#"{"a":1,"b":2,"c":3,"d":4}"#),
            "JSON: a, b, c"
        );
    }

    #[test]
    fn json_title_keeps_key_insertion_order() {
        assert_eq!(generate(r#"{"zeta":1,"alpha":2}"#), "JSON: zeta, alpha");
    }

    #[test]
    fn non_object_json_gets_generic_title() {
        assert_eq!(generate("[1, 2, 3]"), "JSON Data");
    }

    // === SQL Titles ===

    #[test]
    fn sql_title_names_leading_verb() {
        assert_eq!(generate("SELECT * FROM users;"), "SQL SELECT");
        assert_eq!(generate("insert into logs values (1)"), "SQL INSERT");
    }

    #[test]
    fn sql_title_falls_back_without_verb() {
        let titles = TitleGenerator::new();
        let classification = Classification::new(ContentType::Sql, vec![], 0.9);
        assert_eq!(
            titles.generate("show tables", &classification),
            "SQL Query"
        );
    }

    // === Command Titles ===

    #[test]
    fn command_title_uses_first_token() {
        assert_eq!(generate("sudo npm install"), "Command: sudo");
    }

    // === Path Titles ===

    #[test]
    fn path_title_uses_last_segment() {
        assert_eq!(generate("/usr/local/bin/tool"), "Path: tool");
        assert_eq!(generate(r"C:\Users\me\report.pdf"), "Path: report.pdf");
    }

    #[test]
    fn trailing_separator_falls_back_to_file() {
        let titles = TitleGenerator::new();
        let classification = Classification::new(ContentType::Path, vec![], 0.8);
        assert_eq!(
            titles.generate("/usr/local/", &classification),
            "Path: File"
        );
    }

    // === Prose Titles ===

    #[test]
    fn short_first_sentence_is_used_verbatim() {
        assert_eq!(
            generate("Buy milk tomorrow. Also eggs."),
            "Buy milk tomorrow"
        );
    }

    #[test]
    fn long_first_sentence_falls_back_to_leading_words() {
        let content = "considering numerous stakeholder alignment meetings scheduled quarterly \
                       together with pending review feedback";
        let title = generate(content);
        assert!(title.ends_with("..."));
        assert!(title.chars().count() <= 50);
    }

    #[test]
    fn empty_text_still_gets_a_title() {
        let title = generate("");
        assert!(!title.is_empty());
        assert_eq!(title, FALLBACK_TITLE);
    }

    #[test]
    fn prose_title_is_bounded() {
        let inputs = [
            "word ".repeat(200),
            "a".repeat(400),
            "Tiny".to_string(),
            "One two three four five six seven eight nine ten".to_string(),
        ];
        for input in inputs {
            let title = generate(&input);
            assert!(!title.is_empty());
            assert!(
                title.chars().count() <= 53,
                "title too long for {:?}: {title}",
                &input[..20.min(input.len())]
            );
        }
    }

    #[test]
    fn markdown_content_type_uses_prose_branch() {
        let titles = TitleGenerator::new();
        let classification = Classification::new(ContentType::Markdown, vec![], 0.9);
        assert_eq!(
            titles.generate("Release notes for the week", &classification),
            "Release notes for the week"
        );
    }
}
