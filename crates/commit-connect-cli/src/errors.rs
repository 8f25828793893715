// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `ConnectError` and appends a hint per
//! variant. The library keeps structured error data; wording for the
//! terminal lives here.

use std::fmt::Write;

use anyhow::Error;
use commit_connect_core::ConnectError;
use commit_connect_core::ai::registry::get_provider;
use commit_connect_core::utils::truncate;

/// Longest raw AI response echoed back to the user.
const MAX_RAW_RESPONSE: usize = 500;

/// Formats an error for CLI display with helpful hints.
///
/// Non-`ConnectError` errors are shown with their context chain.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.chain().find_map(|e| e.downcast_ref::<ConnectError>()) else {
        return format!("{error:#}");
    };

    match err {
        ConnectError::AuthenticationFailed { .. } => format!(
            "{err}\n\nTip: The token was rejected. Create a new personal access token or run `gh auth login`."
        ),
        ConnectError::NotAuthenticated => err.to_string(),
        ConnectError::GitHub { status, .. } => {
            let mut msg = err.to_string();
            match status {
                401 | 403 => {
                    msg.push_str("\n\nTip: Check your token with `commit-connect auth status`.");
                }
                422 => msg.push_str(
                    "\n\nTip: GitHub rejected the search query. Try fewer or simpler filters.",
                ),
                _ => {}
            }
            msg
        }
        ConnectError::MissingInput { field } => match field.as_str() {
            "languages" => format!(
                "{err}\n\nTip: Pass --language <LANG> (repeatable) or --top <N> to use your own languages."
            ),
            _ => err.to_string(),
        },
        ConnectError::AI {
            message,
            status,
            provider,
        } => {
            let mut msg = format!("AI provider error: {message}");
            if let Some(code) = status {
                let _ = write!(msg, " (HTTP {code})");
            }
            let _ = write!(
                msg,
                "\n\nTip: Check your {} environment variable.",
                key_env(provider)
            );
            msg
        }
        ConnectError::Completion { .. } => format!(
            "{err}\n\nTip: Check your AI API key (e.g. {}) and try again.",
            key_env("gemini")
        ),
        ConnectError::NoJsonObject { raw_response }
        | ConnectError::InvalidAiJson { raw_response, .. } => format!(
            "{err}\n\nRaw response:\n{}\n\nTip: Try rephrasing your prompt.",
            truncate(raw_response.trim(), MAX_RAW_RESPONSE)
        ),
        ConnectError::InvalidResponse { .. } => format!(
            "{err}\n\nTip: Check that github.api_url points at a GitHub REST API ({}).",
            commit_connect_core::config_file_path().display()
        ),
        ConnectError::Config { .. } => format!(
            "{err}\n\nTip: Check your config file at {}",
            commit_connect_core::config_file_path().display()
        ),
        ConnectError::Network(_) => {
            format!("{err}\n\nTip: Check your internet connection and try again.")
        }
    }
}

fn key_env(provider: &str) -> &'static str {
    get_provider(&provider.to_lowercase())
        .or_else(|| {
            commit_connect_core::all_providers()
                .iter()
                .find(|p| p.display_name.eq_ignore_ascii_case(provider))
        })
        .map_or("GEMINI_API_KEY", |p| p.api_key_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_auth_failure_has_tip() {
        let err = anyhow::Error::new(ConnectError::AuthenticationFailed {
            status: 401,
            message: "Bad credentials".to_string(),
        });
        let formatted = format_error(&err);
        assert!(formatted.contains("HTTP 401"));
        assert!(formatted.contains("gh auth login"));
    }

    #[test]
    fn test_format_no_json_includes_raw_response() {
        let err = anyhow::Error::new(ConnectError::NoJsonObject {
            raw_response: "I cannot help with that".to_string(),
        });
        let formatted = format_error(&err);
        assert!(formatted.contains("Raw response:\nI cannot help with that"));
    }

    #[test]
    fn test_format_ai_error_names_key_variable() {
        let err = anyhow::Error::new(ConnectError::AI {
            message: "Invalid key".to_string(),
            status: Some(401),
            provider: "Groq".to_string(),
        });
        let formatted = format_error(&err);
        assert!(formatted.contains("(HTTP 401)"));
        assert!(formatted.contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_format_missing_languages_hint() {
        let err = anyhow::Error::new(ConnectError::MissingInput {
            field: "languages".to_string(),
        });
        assert!(format_error(&err).contains("--language"));
    }

    #[test]
    fn test_format_context_wrapped_error() {
        let err = anyhow::Error::new(ConnectError::GitHub {
            status: 422,
            message: "Validation Failed".to_string(),
        })
        .context("Issue search failed");
        let formatted = format_error(&err);
        assert!(formatted.contains("Validation Failed"));
        assert!(formatted.contains("simpler filters"));
    }

    #[test]
    fn test_format_invalid_response_points_at_api_url() {
        let err = anyhow::Error::new(ConnectError::InvalidResponse {
            status: 200,
            message: "missing field `login`".to_string(),
        });
        let formatted = format_error(&err);
        assert!(formatted.starts_with("Unexpected GitHub response (HTTP 200)"));
        assert!(formatted.contains("github.api_url"));
    }

    #[test]
    fn test_format_plain_error() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(format_error(&err), "something else");
    }
}
