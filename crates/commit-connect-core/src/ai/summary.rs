// SPDX-License-Identifier: Apache-2.0

//! Beginner-friendly issue explanations.

use tracing::instrument;

use super::provider::CompletionProvider;
use crate::error::{ConnectError, Result};
use crate::utils::truncate_with_suffix;

/// Maximum issue body length sent to the model, in characters.
pub const MAX_BODY_LENGTH: usize = 4000;

/// Build the explanation prompt for one issue.
#[must_use]
pub fn build_summary_prompt(title: &str, body: Option<&str>) -> String {
    let body = match body.map(str::trim) {
        Some(b) if !b.is_empty() => truncate_with_suffix(b, MAX_BODY_LENGTH, "\n[... truncated]"),
        _ => "[No description provided]".to_string(),
    };

    format!(
        "You help newcomers understand open source issues. Explain the GitHub issue below \
to someone who has never contributed to this project. Use plain language and short \
paragraphs or bullet points, formatted as Markdown with these sections:\n\n\
## Summary\n\
## What needs to be done\n\
## Skills you'll need\n\
## Where to start\n\n\
Issue title: {title}\n\n\
Issue body:\n{body}\n"
    )
}

/// Ask the provider for an explanation and return its text unchanged.
#[instrument(skip(provider, body), fields(provider = provider.name()))]
pub async fn summarize_issue(
    provider: &dyn CompletionProvider,
    title: &str,
    body: Option<&str>,
) -> Result<String> {
    if title.trim().is_empty() && body.is_none_or(|b| b.trim().is_empty()) {
        return Err(ConnectError::missing("issue"));
    }

    let text = provider
        .complete(&build_summary_prompt(title, body))
        .await
        .map_err(|e| ConnectError::Completion {
            message: e.to_string(),
        })?;

    if text.trim().is_empty() {
        return Err(ConnectError::Completion {
            message: "Provider returned an empty explanation".to_string(),
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_has_all_sections() {
        let prompt = build_summary_prompt("Fix typo", Some("The README says teh."));
        for section in [
            "## Summary",
            "## What needs to be done",
            "## Skills you'll need",
            "## Where to start",
        ] {
            assert!(prompt.contains(section), "missing {section}");
        }
        assert!(prompt.contains("Issue title: Fix typo"));
        assert!(prompt.contains("The README says teh."));
    }

    #[test]
    fn test_prompt_placeholder_for_empty_body() {
        assert!(build_summary_prompt("t", None).contains("[No description provided]"));
        assert!(build_summary_prompt("t", Some("   ")).contains("[No description provided]"));
    }

    #[test]
    fn test_prompt_truncates_long_body() {
        let body = "x".repeat(MAX_BODY_LENGTH * 2);
        let prompt = build_summary_prompt("t", Some(&body));
        assert!(prompt.contains("[... truncated]"));
        assert!(prompt.len() < MAX_BODY_LENGTH + 1000);
    }
}
