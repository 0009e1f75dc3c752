//! Text normalization helpers shared by the tag engine, catalog search, and
//! the chat assistant.
//!
//! Every function here is total: malformed or empty input yields an empty
//! result, never an error.

use std::collections::HashSet;
use std::sync::LazyLock;

use common::TagInput;
use regex::Regex;

/// Title used for a chat thread whose first message is blank.
pub const DEFAULT_CHAT_TITLE: &str = "Жаңа чат";

/// Longest chat title, in characters, before truncation.
pub const CHAT_TITLE_MAX_CHARS: usize = 40;

/// Characters with special meaning in document-store (PCRE) patterns.
const PATTERN_METACHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[`*_]").expect("valid regex"));
static LIST_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-+•]\s+").expect("valid regex"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*#{1,6}\s+").expect("valid regex"));
static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s?").expect("valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Turn explicit tag input into a trimmed list with empty entries dropped.
///
/// A string is split on commas. List items are converted to their string
/// form first: `null` becomes `"null"`, numbers their shortest decimal text
/// (`1.0` is `"1"`), nested lists their items joined with commas. Absent
/// input and any other JSON value give an empty list.
pub fn normalize_tag_list(input: Option<&TagInput>) -> Vec<String> {
    match input {
        Some(TagInput::Csv(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect(),
        Some(TagInput::List(items)) => items
            .iter()
            .map(value_to_text)
            .map(|item| item.trim().to_owned())
            .filter(|item| !item.is_empty())
            .collect(),
        Some(TagInput::Other(_)) | None => Vec::new(),
    }
}

fn value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "null".to_owned(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => number_to_text(n),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| match item {
                serde_json::Value::Null => String::new(),
                other => value_to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn number_to_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f == 0.0 {
                return "0".to_owned();
            }
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{f:.0}");
            }
        }
    }
    n.to_string()
}

/// Drop repeated tags, keeping the first occurrence of each.
pub fn dedupe_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(tags.len());
    tags.iter()
        .map(AsRef::as_ref)
        .filter(|tag| seen.insert(*tag))
        .map(str::to_owned)
        .collect()
}

/// Backslash-escape pattern metacharacters so `value` matches literally.
pub fn escape_regex(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if PATTERN_METACHARACTERS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Remove markdown decoration from generated assistant text.
pub fn strip_markdown(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let text = EMPHASIS.replace_all(value, "");
    let text = LIST_BULLET.replace_all(&text, "");
    let text = HEADING.replace_all(&text, "");
    let text = BLOCKQUOTE.replace_all(&text, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().to_owned()
}

/// Title for a chat thread, derived from its first message.
pub fn build_chat_title(message: &str) -> String {
    let text = message.trim();
    if text.is_empty() {
        return DEFAULT_CHAT_TITLE.to_owned();
    }
    if text.chars().count() > CHAT_TITLE_MAX_CHARS {
        let mut title: String = text.chars().take(CHAT_TITLE_MAX_CHARS).collect();
        title.push('…');
        return title;
    }
    text.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn normalize_splits_csv() {
        let input = TagInput::from("a, b, , c");
        assert_eq!(normalize_tag_list(Some(&input)), vec!["a", "b", "c"]);
    }

    #[test]
    fn normalize_coerces_list_items() {
        let input = TagInput::List(vec![json!(" x "), json!(2), json!(null), json!(true)]);
        assert_eq!(
            normalize_tag_list(Some(&input)),
            vec!["x", "2", "null", "true"]
        );
    }

    #[test]
    fn normalize_prints_integral_floats_without_fraction() {
        let input = TagInput::List(vec![json!(1.0), json!(1e2), json!(2), json!(2.5), json!(-0.0)]);
        assert_eq!(
            normalize_tag_list(Some(&input)),
            vec!["1", "100", "2", "2.5", "0"]
        );
    }

    #[test]
    fn normalize_joins_nested_lists_with_commas() {
        let input = TagInput::List(vec![json!(["a", "b"]), json!([1.0, null, "c"]), json!([])]);
        assert_eq!(normalize_tag_list(Some(&input)), vec!["a,b", "1,,c"]);
    }

    #[test]
    fn normalize_absent_and_other_are_empty() {
        assert!(normalize_tag_list(None).is_empty());
        assert!(normalize_tag_list(Some(&TagInput::Other(json!(7)))).is_empty());
        assert!(normalize_tag_list(Some(&TagInput::from(""))).is_empty());
        assert!(normalize_tag_list(Some(&TagInput::from(" , ,"))).is_empty());
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        assert_eq!(dedupe_tags(&["a", "b", "a", "c", "b"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn escape_regex_escapes_metacharacters() {
        assert_eq!(escape_regex("a+b?c"), "a\\+b\\?c");
        assert_eq!(escape_regex("(1.5) [x]"), "\\(1\\.5\\) \\[x\\]");
        assert_eq!(escape_regex("раушан"), "раушан");
    }

    #[test]
    fn escaped_text_matches_literally() {
        let raw = "a+b?c (x|y) $5.00";
        let pattern = Regex::new(&format!("^{}$", escape_regex(raw))).unwrap();
        assert!(pattern.is_match(raw));
        assert!(!pattern.is_match("aab?c (x|y) $5.00"));
    }

    #[test]
    fn strip_markdown_removes_emphasis_and_code() {
        assert_eq!(strip_markdown("*Hello* **world** `code`"), "Hello world code");
    }

    #[test]
    fn strip_markdown_removes_structure() {
        let input = "## Ұсыныстар\n- Қызыл раушан\n+ Пион\n> цитата\n\n__Барлығы__";
        assert_eq!(
            strip_markdown(input),
            "Ұсыныстар\nҚызыл раушан\nПион\nцитата Барлығы"
        );
    }

    #[test]
    fn strip_markdown_empty() {
        assert_eq!(strip_markdown(""), "");
        assert_eq!(strip_markdown("   "), "");
    }

    #[test]
    fn chat_title_short_and_blank() {
        assert_eq!(build_chat_title("Hello"), "Hello");
        assert_eq!(build_chat_title("   "), DEFAULT_CHAT_TITLE);
    }

    #[test]
    fn chat_title_truncates_on_characters() {
        let message = "қ".repeat(45);
        let title = build_chat_title(&message);
        assert_eq!(title.chars().count(), CHAT_TITLE_MAX_CHARS + 1);
        assert!(title.ends_with('…'));
    }

    proptest! {
        #[test]
        fn dedupe_is_idempotent(xs in prop::collection::vec("[a-c]{0,2}", 0..12)) {
            let once = dedupe_tags(&xs);
            prop_assert_eq!(dedupe_tags(&once), once.clone());
        }
    }
}
