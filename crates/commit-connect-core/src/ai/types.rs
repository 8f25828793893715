// SPDX-License-Identifier: Apache-2.0

//! Chat-completion wire types and the typed prompt filters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// A message in a chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    /// Message content. Some providers send `null` for empty replies.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

/// Request body for OpenAI-compatible chat completion endpoints.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier.
    pub model: String,
    /// List of messages in the conversation.
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens in response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Response from a chat completion endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// List of choices (usually just one).
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A single choice in the chat completion response.
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChatMessage,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Difficulty level inferred from a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Newcomer friendly.
    Beginner,
    /// Some familiarity required.
    Intermediate,
    /// Deep expertise required.
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Search filters extracted from a free-text prompt.
///
/// Every field defaults to empty; `null`, a bare string, or a list are all
/// accepted for the list fields. Frameworks may arrive under several key
/// names in one object; their values are merged in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFilters")]
pub struct PromptFilters {
    /// Programming languages.
    pub languages: Vec<String>,
    /// Frameworks and libraries.
    pub frameworks: Vec<String>,
    /// Tools and platforms.
    pub tools: Vec<String>,
    /// Difficulty level, absent when unspecified or unrecognised.
    pub difficulty: Option<Difficulty>,
    /// Other topical filters.
    pub other_filters: Vec<String>,
    /// Terms whose matching issues are dropped.
    pub exclude: Vec<String>,
}

/// Wire shape of [`PromptFilters`] as completions actually write it.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawFilters {
    #[serde(deserialize_with = "one_or_many")]
    languages: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    frameworks: Vec<String>,
    #[serde(
        rename = "frameworks and libraries",
        alias = "frameworks_and_libraries",
        deserialize_with = "one_or_many"
    )]
    frameworks_and_libraries: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    libraries: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    tools: Vec<String>,
    #[serde(deserialize_with = "lenient_difficulty")]
    difficulty: Option<Difficulty>,
    #[serde(deserialize_with = "one_or_many")]
    other_filters: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    exclude: Vec<String>,
}

impl From<RawFilters> for PromptFilters {
    fn from(raw: RawFilters) -> Self {
        let mut frameworks: Vec<String> = Vec::new();
        for name in raw
            .frameworks_and_libraries
            .into_iter()
            .chain(raw.frameworks)
            .chain(raw.libraries)
        {
            if !frameworks.iter().any(|f| f.eq_ignore_ascii_case(&name)) {
                frameworks.push(name);
            }
        }
        Self {
            languages: raw.languages,
            frameworks,
            tools: raw.tools,
            difficulty: raw.difficulty,
            other_filters: raw.other_filters,
            exclude: raw.exclude,
        }
    }
}

impl PromptFilters {
    /// Whether no filter was extracted at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
            && self.frameworks.is_empty()
            && self.tools.is_empty()
            && self.difficulty.is_none()
            && self.other_filters.is_empty()
            && self.exclude.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<Option<String>>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let values = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(items)) => items.into_iter().flatten().collect(),
    };
    Ok(values
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

fn lenient_difficulty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Difficulty>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_accept_spaced_key_names() {
        let json = r#"{
            "languages": ["Python"],
            "frameworks and libraries": ["Django", "React"],
            "tools": [],
            "difficulty": "Beginner",
            "other_filters": ["documentation"],
            "exclude": ["Java"]
        }"#;
        let filters: PromptFilters = serde_json::from_str(json).expect("valid filters");
        assert_eq!(filters.languages, vec!["Python"]);
        assert_eq!(filters.frameworks, vec!["Django", "React"]);
        assert_eq!(filters.difficulty, Some(Difficulty::Beginner));
        assert_eq!(filters.exclude, vec!["Java"]);
    }

    #[test]
    fn test_filters_merge_framework_keys() {
        let json = r#"{
            "frameworks": ["Flask", "Django"],
            "frameworks and libraries": ["Django"],
            "libraries": "pandas"
        }"#;
        let filters: PromptFilters = serde_json::from_str(json).expect("valid filters");
        assert_eq!(filters.frameworks, vec!["Django", "Flask", "pandas"]);
    }

    #[test]
    fn test_filters_reload_from_own_serialization() {
        let filters = PromptFilters {
            frameworks: vec!["React".to_string()],
            difficulty: Some(Difficulty::Advanced),
            ..PromptFilters::default()
        };
        let json = serde_json::to_string(&filters).expect("serialize");
        assert!(json.contains(r#""frameworks":["React"]"#));
        let back: PromptFilters = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, filters);
    }

    #[test]
    fn test_filters_tolerate_nulls_and_missing_fields() {
        let json = r#"{"languages": null, "difficulty": null, "tools": "Docker"}"#;
        let filters: PromptFilters = serde_json::from_str(json).expect("valid filters");
        assert!(filters.languages.is_empty());
        assert!(filters.frameworks.is_empty());
        assert_eq!(filters.tools, vec!["Docker"]);
        assert_eq!(filters.difficulty, None);
    }

    #[test]
    fn test_difficulty_is_case_insensitive_and_lenient() {
        let filters: PromptFilters =
            serde_json::from_str(r#"{"difficulty": "intermediate"}"#).expect("valid");
        assert_eq!(filters.difficulty, Some(Difficulty::Intermediate));

        let filters: PromptFilters =
            serde_json::from_str(r#"{"difficulty": "None"}"#).expect("valid");
        assert_eq!(filters.difficulty, None);
    }

    #[test]
    fn test_list_items_are_trimmed_and_nulls_dropped() {
        let filters: PromptFilters =
            serde_json::from_str(r#"{"languages": [" Rust ", null, ""]}"#).expect("valid");
        assert_eq!(filters.languages, vec!["Rust"]);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let result = serde_json::from_str::<PromptFilters>(r#"{"languages": 42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_filters() {
        assert!(PromptFilters::default().is_empty());
    }

    #[test]
    fn test_chat_message_null_content() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":null}"#).expect("valid");
        assert!(msg.content.is_empty());
    }
}
