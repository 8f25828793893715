// SPDX-License-Identifier: Apache-2.0

//! GitHub token resolution.
//!
//! The session token is resolved once, in priority order:
//! 1. Explicit value (the `--token` flag)
//! 2. Environment variable (`GH_TOKEN`, then `GITHUB_TOKEN`)
//! 3. GitHub CLI (`gh auth token`)
//!
//! The token is never persisted by this crate.

use std::process::Command;

use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, instrument};

/// Source of the GitHub authentication token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// Token passed explicitly on the command line.
    Flag,
    /// Token from `GH_TOKEN` or `GITHUB_TOKEN` environment variable.
    Environment,
    /// Token from `gh auth token` command.
    GhCli,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Flag => write!(f, "command-line flag"),
            TokenSource::Environment => write!(f, "environment variable"),
            TokenSource::GhCli => write!(f, "GitHub CLI"),
        }
    }
}

/// Attempts to get a token from the GitHub CLI.
///
/// Returns `None` when `gh` is missing, unauthenticated, or prints nothing.
#[instrument]
fn get_token_from_gh_cli() -> Option<SecretString> {
    debug!("Attempting to get token from gh CLI");

    match Command::new("gh").args(["auth", "token"]).output() {
        Ok(output) if output.status.success() => {
            let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if token.is_empty() {
                debug!("gh auth token returned empty output");
                None
            } else {
                Some(SecretString::from(token))
            }
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(status = ?output.status, stderr = %stderr.trim(), "gh auth token failed");
            None
        }
        Err(e) => {
            debug!(error = %e, "Failed to execute gh command");
            None
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Resolves a GitHub token using the priority chain.
///
/// Returns the token and its source, or `None` if no token is found.
#[instrument(skip(explicit))]
pub fn resolve_token(explicit: Option<&str>) -> Option<(SecretString, TokenSource)> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        debug!("Using token from command-line flag");
        return Some((SecretString::from(token.to_string()), TokenSource::Flag));
    }

    for var in ["GH_TOKEN", "GITHUB_TOKEN"] {
        if let Some(token) = non_empty_env(var) {
            debug!(var, "Using token from environment variable");
            return Some((SecretString::from(token), TokenSource::Environment));
        }
    }

    if let Some(token) = get_token_from_gh_cli() {
        debug!("Using token from GitHub CLI");
        return Some((token, TokenSource::GhCli));
    }

    debug!("No token found in any source");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn set(vars: &[(&'static str, Option<&str>)]) -> Self {
            let saved = vars
                .iter()
                .map(|(k, _)| (*k, std::env::var(k).ok()))
                .collect();
            for (k, v) in vars {
                unsafe {
                    match v {
                        Some(v) => std::env::set_var(k, v),
                        None => std::env::remove_var(k),
                    }
                }
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (k, v) in &self.saved {
                unsafe {
                    match v {
                        Some(v) => std::env::set_var(k, v),
                        None => std::env::remove_var(k),
                    }
                }
            }
        }
    }

    #[test]
    fn test_token_source_display() {
        assert_eq!(TokenSource::Flag.to_string(), "command-line flag");
        assert_eq!(TokenSource::Environment.to_string(), "environment variable");
        assert_eq!(TokenSource::GhCli.to_string(), "GitHub CLI");
    }

    #[test]
    #[serial]
    fn test_explicit_token_wins() {
        let _guard = EnvGuard::set(&[("GH_TOKEN", Some("from-env"))]);
        let (token, source) = resolve_token(Some("  from-flag ")).expect("token");
        assert_eq!(token.expose_secret(), "from-flag");
        assert_eq!(source, TokenSource::Flag);
    }

    #[test]
    #[serial]
    fn test_gh_token_before_github_token() {
        let _guard = EnvGuard::set(&[
            ("GH_TOKEN", Some("gh-value")),
            ("GITHUB_TOKEN", Some("github-value")),
        ]);
        let (token, source) = resolve_token(None).expect("token");
        assert_eq!(token.expose_secret(), "gh-value");
        assert_eq!(source, TokenSource::Environment);
    }

    #[test]
    #[serial]
    fn test_empty_values_are_skipped() {
        let _guard = EnvGuard::set(&[("GH_TOKEN", Some("")), ("GITHUB_TOKEN", Some("fallback"))]);
        let (token, _) = resolve_token(Some("   ")).expect("token");
        assert_eq!(token.expose_secret(), "fallback");
    }
}
