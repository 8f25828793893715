// SPDX-License-Identifier: Apache-2.0

//! Error types for Commit-Connect.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur during Commit-Connect operations.
#[derive(Error, Debug)]
pub enum ConnectError {
    /// The profile or repository endpoint rejected the session token.
    #[error("GitHub authentication failed (HTTP {status}): {message}")]
    AuthenticationFailed {
        /// HTTP status returned by GitHub.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// No token could be resolved for the session.
    #[error(
        "Authentication required - pass --token, or set GH_TOKEN / GITHUB_TOKEN, or log in with `gh auth login`"
    )]
    NotAuthenticated,

    /// Non-success response from a GitHub search endpoint.
    #[error("GitHub API error (HTTP {status}): {message}")]
    GitHub {
        /// HTTP status returned by GitHub.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// A required input was empty.
    #[error("Missing input: {field}")]
    MissingInput {
        /// Name of the missing field.
        field: String,
    },

    /// AI provider returned an error status or an unusable body.
    #[error("AI provider error: {message}")]
    AI {
        /// Error message from the AI provider.
        message: String,
        /// Optional HTTP status code from the provider.
        status: Option<u16>,
        /// Name of the AI provider (e.g., `Gemini`, `OpenRouter`).
        provider: String,
    },

    /// The completion call itself failed.
    #[error("Completion failed: {message}")]
    Completion {
        /// Description of the underlying failure.
        message: String,
    },

    /// The completion text contained no JSON object.
    #[error("No JSON object found in AI response")]
    NoJsonObject {
        /// Completion text, verbatim.
        raw_response: String,
    },

    /// A JSON object was found but could not be decoded into filters.
    #[error("Invalid JSON in AI response: {message}")]
    InvalidAiJson {
        /// Decoder error message.
        message: String,
        /// Completion text, verbatim.
        raw_response: String,
    },

    /// A successful GitHub response whose body was not the expected JSON.
    #[error("Unexpected GitHub response (HTTP {status}): {message}")]
    InvalidResponse {
        /// HTTP status returned by GitHub.
        status: u16,
        /// Decoder error message.
        message: String,
    },

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ConnectError {
    /// Raw completion text carried by AI parse errors.
    #[must_use]
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::NoJsonObject { raw_response } | Self::InvalidAiJson { raw_response, .. } => {
                Some(raw_response)
            }
            _ => None,
        }
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { status, .. } | Self::GitHub { status, .. } => {
                Some(*status)
            }
            Self::AI { status, .. } => *status,
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingInput {
            field: field.to_string(),
        }
    }
}

impl From<config::ConfigError> for ConnectError {
    fn from(err: config::ConfigError) -> Self {
        ConnectError::Config {
            message: err.to_string(),
        }
    }
}

/// Result alias used throughout the core library.
pub type Result<T> = std::result::Result<T, ConnectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_accessor() {
        let err = ConnectError::NoJsonObject {
            raw_response: "sorry, no filters".to_string(),
        };
        assert_eq!(err.raw_response(), Some("sorry, no filters"));

        let err = ConnectError::InvalidAiJson {
            message: "expected value".to_string(),
            raw_response: "{oops}".to_string(),
        };
        assert_eq!(err.raw_response(), Some("{oops}"));

        assert_eq!(ConnectError::NotAuthenticated.raw_response(), None);
    }

    #[test]
    fn test_status_accessor() {
        let err = ConnectError::AuthenticationFailed {
            status: 401,
            message: "Bad credentials".to_string(),
        };
        assert_eq!(err.status(), Some(401));

        let err = ConnectError::GitHub {
            status: 422,
            message: "Validation Failed".to_string(),
        };
        assert_eq!(err.status(), Some(422));

        assert_eq!(ConnectError::missing("languages").status(), None);
    }

    #[test]
    fn test_display_includes_status() {
        let err = ConnectError::GitHub {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API error (HTTP 503): unavailable");
    }
}
