// SPDX-License-Identifier: Apache-2.0

//! Configuration management for Commit-Connect.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `COMMIT_CONNECT_`)
//! 2. Config file: `~/.config/commit-connect/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Raise the star threshold for repository search
//! COMMIT_CONNECT_SEARCH__MIN_STARS=500 commit-connect search -l Rust
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ConnectError;

const APP_DIR: &str = "commit-connect";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// AI provider settings.
    pub ai: AiConfig,
    /// Repository search defaults.
    pub search: SearchConfig,
    /// Issue recommendation defaults.
    pub issues: IssuesConfig,
    /// Session cache settings.
    pub cache: CacheConfig,
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API.
    pub api_url: String,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// Page size for `/user/repos`.
    pub per_page: u32,
    /// Upper bound on pages fetched from `/user/repos`.
    pub max_pages: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            api_timeout_seconds: 10,
            per_page: 100,
            max_pages: 10,
        }
    }
}

/// AI provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Provider name from the registry (`gemini`, `openrouter`, `groq`).
    pub provider: String,
    /// Model identifier sent to the provider.
    pub model: String,
    /// Completion request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum tokens in a completion.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash".to_string(),
            timeout_seconds: 30,
            max_tokens: 2048,
            temperature: 0.2,
        }
    }
}

/// Repository search defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum stargazer count.
    pub min_stars: u32,
    /// Only repositories pushed within this many days.
    pub recency_days: u32,
    /// Results requested per language.
    pub results_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_stars: 50,
            recency_days: 30,
            results_limit: 30,
        }
    }
}

/// Issue recommendation defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IssuesConfig {
    /// Only issues updated within this many days; 0 disables the clause.
    pub recency_days: u32,
    /// Results requested from `/search/issues`.
    pub results_limit: u32,
}

impl Default for IssuesConfig {
    fn default() -> Self {
        Self {
            recency_days: 90,
            results_limit: 30,
        }
    }
}

/// Session cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache TTL in minutes; 0 keeps entries for the whole session.
    pub ttl_minutes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_minutes: 30 }
    }
}

/// Returns the Commit-Connect configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/commit-connect`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join(APP_DIR);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(APP_DIR)
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration from the default location.
///
/// Environment variables use the prefix `COMMIT_CONNECT_` and double
/// underscore for nested keys (e.g., `COMMIT_CONNECT_AI__MODEL`).
///
/// # Errors
///
/// Returns `ConnectError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, ConnectError> {
    load_config_from(&config_file_path())
}

/// Load application configuration from an explicit file path.
///
/// The file is optional; environment variables still apply on top of it.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConnectError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("COMMIT_CONNECT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
