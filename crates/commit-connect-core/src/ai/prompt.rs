// SPDX-License-Identifier: Apache-2.0

//! Free-text prompt interpretation.
//!
//! The user's text is embedded in a fixed instruction template with a few
//! worked examples; the first JSON object in the completion is decoded into
//! [`PromptFilters`].

use tracing::{debug, instrument, warn};

use super::provider::CompletionProvider;
use super::types::PromptFilters;
use crate::error::{ConnectError, Result};

const FILTER_INSTRUCTIONS: &str = r#"You are an assistant for an open source contribution website. You extract structured search filters from a user's description of the projects they want to contribute to. The filters decide which GitHub issues are recommended. The user may also say what they do NOT want.

Return ONLY a JSON object with these fields:
- "languages": list of programming languages
- "frameworks and libraries": list of frameworks or libraries
- "tools": list of tools or platforms
- "difficulty": "Beginner" | "Intermediate" | "Advanced" | null
- "other_filters": list of useful topics, tags or keywords
- "exclude": list of languages, frameworks, libraries, tools or topics to avoid

Use empty lists for anything not mentioned. No markdown, no explanation, only the JSON.

Example prompt: "I'm new to open source and know some Python and Django"
Example output: {"languages": ["Python"], "frameworks and libraries": ["Django"], "tools": [], "difficulty": "Beginner", "other_filters": [], "exclude": []}

Example prompt: "Intermediate React developer, interested in accessibility work, no PHP please"
Example output: {"languages": ["JavaScript"], "frameworks and libraries": ["React"], "tools": [], "difficulty": "Intermediate", "other_filters": ["accessibility"], "exclude": ["PHP"]}

Example prompt: "Hard Rust problems involving Docker and CI, but not documentation"
Example output: {"languages": ["Rust"], "frameworks and libraries": [], "tools": ["Docker", "CI"], "difficulty": "Advanced", "other_filters": [], "exclude": ["documentation"]}
"#;

/// Build the filter-extraction prompt for the user's text.
#[must_use]
pub fn build_filter_prompt(text: &str) -> String {
    format!(
        "{FILTER_INSTRUCTIONS}\nPrompt: \"{}\"\nOutput:",
        text.trim()
    )
}

/// Byte ranges of every balanced top-level `{...}` group, in order.
///
/// Braces inside JSON string literals are ignored.
fn balanced_objects(text: &str) -> Vec<(usize, usize)> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if depth > 0 && in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    groups.push((start, i + 1));
                }
            }
            _ => {}
        }
    }
    groups
}

/// Locate the JSON object in a completion.
///
/// Prefers the first balanced group that parses as a JSON object, then the
/// first balanced group, then the span from the first `{` to the last `}`.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let groups = balanced_objects(text);

    let parsed = groups.iter().map(|&(s, e)| &text[s..e]).find(|candidate| {
        serde_json::from_str::<serde_json::Value>(candidate).is_ok_and(|v| v.is_object())
    });
    if parsed.is_some() {
        return parsed;
    }
    if let Some(&(s, e)) = groups.first() {
        return Some(&text[s..e]);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Decode completion text into filters.
///
/// # Errors
///
/// [`ConnectError::NoJsonObject`] when no object is present and
/// [`ConnectError::InvalidAiJson`] when it does not decode; both carry the
/// completion text verbatim.
pub fn parse_filters(completion: &str) -> Result<PromptFilters> {
    let Some(json) = extract_json_object(completion) else {
        return Err(ConnectError::NoJsonObject {
            raw_response: completion.to_string(),
        });
    };

    serde_json::from_str(json).map_err(|e| ConnectError::InvalidAiJson {
        message: e.to_string(),
        raw_response: completion.to_string(),
    })
}

/// Interpret free text into filters via the completion provider.
#[instrument(skip(provider, text), fields(provider = provider.name()))]
pub async fn interpret_prompt(
    provider: &dyn CompletionProvider,
    text: &str,
) -> Result<PromptFilters> {
    if text.trim().is_empty() {
        return Err(ConnectError::missing("prompt"));
    }

    let completion = provider
        .complete(&build_filter_prompt(text))
        .await
        .map_err(|e| ConnectError::Completion {
            message: e.to_string(),
        })?;

    match parse_filters(&completion) {
        Ok(filters) => {
            debug!(?filters, "Interpreted prompt");
            Ok(filters)
        }
        Err(err) => {
            warn!(error = %err, "Could not decode filters from completion");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::Difficulty;

    #[test]
    fn test_prompt_contains_text_and_examples() {
        let prompt = build_filter_prompt("  beginner Go issues ");
        assert!(prompt.contains("Prompt: \"beginner Go issues\""));
        assert!(prompt.contains("Example output:"));
        assert!(prompt.contains("\"exclude\""));
    }

    #[test]
    fn test_extract_from_fenced_block() {
        let text = "Sure!\n```json\n{\"languages\": [\"Go\"]}\n```\nHope that helps.";
        assert_eq!(extract_json_object(text), Some("{\"languages\": [\"Go\"]}"));
    }

    #[test]
    fn test_extract_ignores_braces_in_strings() {
        let text = r#"{"other_filters": ["a } b", "{weird"]} trailing }"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"other_filters": ["a } b", "{weird"]}"#)
        );
    }

    #[test]
    fn test_extract_skips_non_json_brace_group() {
        let text = r#"Using template {name}: {"languages": ["C"]}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"languages": ["C"]}"#));
    }

    #[test]
    fn test_no_brace_is_no_json_object() {
        let text = "I could not understand the request.";
        let err = parse_filters(text).unwrap_err();
        match err {
            ConnectError::NoJsonObject { raw_response } => assert_eq!(raw_response, text),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_object_is_invalid_json() {
        let text = "{languages: [Python]}";
        let err = parse_filters(text).unwrap_err();
        assert!(matches!(err, ConnectError::InvalidAiJson { .. }));
        assert_eq!(err.raw_response(), Some(text));
    }

    #[test]
    fn test_parse_full_filters() {
        let text = r#"{"languages": ["Python"], "frameworks and libraries": [], "tools": ["Docker"], "difficulty": "Beginner", "other_filters": ["testing"], "exclude": []}"#;
        let filters = parse_filters(text).expect("valid");
        assert_eq!(filters.languages, vec!["Python"]);
        assert_eq!(filters.tools, vec!["Docker"]);
        assert_eq!(filters.difficulty, Some(Difficulty::Beginner));
    }
}
