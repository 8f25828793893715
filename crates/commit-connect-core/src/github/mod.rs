// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! A thin REST client plus one module per endpoint family. Every request
//! carries the session token as a bearer credential and is awaited in
//! sequence; there is no retry and no rate-limit handling.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::GitHubConfig;
use crate::error::{ConnectError, Result};

pub mod auth;
pub mod issues;
pub mod profile;
pub mod repos;
pub mod search;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Characters left unescaped in a search query parameter.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a search query for use as the `q` parameter.
#[must_use]
pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, QUERY_ENCODE_SET).to_string()
}

/// Render a qualifier value, quoting it when it contains whitespace.
pub(crate) fn qualifier_value(value: &str) -> String {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

/// Sort direction accepted by the search endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Query parameter value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Envelope returned by `/search/*` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse<T> {
    /// Total hits reported by GitHub.
    #[serde(default)]
    pub total_count: u64,
    /// Whether GitHub timed out before collecting every hit.
    #[serde(default)]
    pub incomplete_results: bool,
    /// Returned page of results.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Authenticated GitHub REST client bound to one session token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
    per_page: u32,
    max_pages: u32,
}

impl GitHubClient {
    /// Build a client from a token and the GitHub configuration section.
    pub fn new(token: SecretString, config: &GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("commit-connect/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.api_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token,
            per_page: config.per_page.clamp(1, 100),
            max_pages: config.max_pages.max(1),
        })
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// API root without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn per_page(&self) -> u32 {
        self.per_page
    }

    pub(crate) fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// GET a URL and decode the JSON body.
    ///
    /// Non-success responses become [`ConnectError::GitHub`] with the body's
    /// `message` field, the raw body, or the canonical reason, in that order.
    #[instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "GitHub response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::GitHub {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| ConnectError::InvalidResponse {
            status: status.as_u16(),
            message: err.to_string(),
        })
    }
}

fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(ErrorBody {
        message: Some(message),
    }) = serde_json::from_str::<ErrorBody>(body)
    {
        return message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
