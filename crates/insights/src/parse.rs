//! Parsing and validation of model responses.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use teampulse_core::alert::AlertType;
use teampulse_core::update::InsightScope;

/// Matches a response wrapped in a Markdown code fence, capturing the body.
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("valid regex")
});

/// A validated insight returned by the generation service.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub title: String,
    pub content: String,
    /// Canonical category name from the scope's closed set.
    pub category: String,
}

/// Raw shape the model is instructed to answer with.
#[derive(Debug, Deserialize)]
struct RawInsight {
    title: String,
    content: String,
    category: String,
}

/// Ways a model response can fail validation.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The response body was not valid JSON.
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field was present but blank.
    #[error("response field `{0}` is empty")]
    EmptyField(&'static str),

    /// The category is not in the scope's closed set.
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}

/// Strip a surrounding Markdown code fence, if any.
///
/// Models regularly wrap JSON answers in ```` ```json ```` fences even
/// when told not to; the inner body is what we parse.
pub fn strip_code_fences(raw: &str) -> &str {
    match FENCE_RE.captures(raw) {
        Some(caps) => caps.get(1).map_or(raw, |m| m.as_str()),
        None => raw.trim(),
    }
}

/// Parse and validate a `{title, content, category}` response.
///
/// The category is matched case-insensitively against the scope's closed
/// set and replaced with its canonical spelling. Anything else is an
/// error; the caller treats it like any other generation failure.
pub fn parse_insight(raw: &str, scope: InsightScope) -> Result<Insight, ParseError> {
    let parsed: RawInsight = serde_json::from_str(strip_code_fences(raw))?;

    let title = parsed.title.trim();
    if title.is_empty() {
        return Err(ParseError::EmptyField("title"));
    }
    let content = parsed.content.trim();
    if content.is_empty() {
        return Err(ParseError::EmptyField("content"));
    }
    let category = scope
        .canonical_category(&parsed.category)
        .ok_or_else(|| ParseError::UnknownCategory(parsed.category.clone()))?;

    Ok(Insight {
        title: title.to_string(),
        content: content.to_string(),
        category: category.to_string(),
    })
}

/// Interpret a screening answer as an alert type.
///
/// The model is asked to answer with a single word; `none` (or anything
/// unrecognized) means no alert.
pub fn parse_screening(raw: &str) -> Option<AlertType> {
    let token = strip_code_fences(raw)
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase();
    AlertType::parse(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_parses() {
        let raw = r#"{"title": "Strong week", "content": "Mood is up.", "category": "Team Performance"}"#;
        let insight = parse_insight(raw, InsightScope::Team).unwrap();
        assert_eq!(insight.title, "Strong week");
        assert_eq!(insight.category, "Team Performance");
    }

    #[test]
    fn fenced_json_parses() {
        let raw = "```json\n{\"title\": \"T\", \"content\": \"C\", \"category\": \"Sleep\"}\n```";
        let insight = parse_insight(raw, InsightScope::Player).unwrap();
        assert_eq!(insight.category, "Sleep");
    }

    #[test]
    fn fence_without_language_tag_parses() {
        let raw = "```\n{\"title\": \"T\", \"content\": \"C\", \"category\": \"Club Trends\"}\n```";
        let insight = parse_insight(raw, InsightScope::Club).unwrap();
        assert_eq!(insight.category, "Club Trends");
    }

    #[test]
    fn category_is_canonicalized_case_insensitively() {
        let raw = r#"{"title": "T", "content": "C", "category": "injury risk"}"#;
        let insight = parse_insight(raw, InsightScope::Team).unwrap();
        assert_eq!(insight.category, "Injury Risk");
    }

    #[test]
    fn unknown_category_is_rejected() {
        let raw = r#"{"title": "T", "content": "C", "category": "Finances"}"#;
        let err = parse_insight(raw, InsightScope::Team).unwrap_err();
        assert!(matches!(err, ParseError::UnknownCategory(_)));
    }

    #[test]
    fn category_from_another_scope_is_rejected() {
        // "Sleep" is a player category, not a team one.
        let raw = r#"{"title": "T", "content": "C", "category": "Sleep"}"#;
        assert!(parse_insight(raw, InsightScope::Team).is_err());
    }

    #[test]
    fn blank_title_is_rejected() {
        let raw = r#"{"title": "  ", "content": "C", "category": "Wellness"}"#;
        let err = parse_insight(raw, InsightScope::Player).unwrap_err();
        assert!(matches!(err, ParseError::EmptyField("title")));
    }

    #[test]
    fn non_json_is_rejected() {
        assert!(parse_insight("Sorry, I cannot help.", InsightScope::Team).is_err());
    }

    #[test]
    fn screening_recognizes_alert_words() {
        assert_eq!(parse_screening("distress"), Some(AlertType::Distress));
        assert_eq!(parse_screening("  Injury.\n"), Some(AlertType::Injury));
        assert_eq!(parse_screening("OVERTRAINING"), Some(AlertType::Overtraining));
    }

    #[test]
    fn screening_none_and_noise_mean_no_alert() {
        assert_eq!(parse_screening("none"), None);
        assert_eq!(parse_screening("The message seems fine."), None);
        assert_eq!(parse_screening(""), None);
    }
}
