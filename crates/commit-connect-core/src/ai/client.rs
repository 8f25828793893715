// SPDX-License-Identifier: Apache-2.0

//! Generic AI client for all registered providers.
//!
//! Posts a single-message chat completion to the provider's
//! OpenAI-compatible endpoint. No retry, no rate-limit handling.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use super::provider::CompletionProvider;
use super::registry::{ProviderConfig, get_provider};
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::AiConfig;
use crate::error::{ConnectError, Result};

/// Generic AI client for all providers.
///
/// Holds HTTP client, API key, and model configuration for reuse across
/// multiple requests.
#[derive(Debug)]
pub struct AiClient {
    provider: &'static ProviderConfig,
    http: Client,
    api_key: SecretString,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AiClient {
    /// Creates a client for `config.provider`, reading the key from the
    /// provider's environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::Config`] for an unknown provider or a missing key.
    pub fn new(config: &AiConfig) -> Result<Self> {
        let provider = lookup(&config.provider)?;
        let api_key = provider
            .api_key_from_env()
            .ok_or_else(|| ConnectError::Config {
                message: format!(
                    "Missing {} environment variable. Set it with: export {}=your_api_key",
                    provider.api_key_env, provider.api_key_env
                ),
            })?;
        Self::with_api_key(SecretString::from(api_key), config)
    }

    /// Creates a client with a provided API key.
    pub fn with_api_key(api_key: SecretString, config: &AiConfig) -> Result<Self> {
        let provider = lookup(&config.provider)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let model = if config.model.trim().is_empty() {
            provider.default_model.to_string()
        } else {
            config.model.clone()
        };

        Ok(Self {
            provider,
            http,
            api_key,
            endpoint: provider.api_url.to_string(),
            model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Send requests to a different endpoint (e.g., a local test server).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Model identifier sent with each request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Human-readable provider name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.provider.display_name
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        }
    }

    fn error(&self, message: String, status: Option<u16>) -> ConnectError {
        ConnectError::AI {
            message,
            status,
            provider: self.provider.display_name.to_string(),
        }
    }
}

fn lookup(name: &str) -> Result<&'static ProviderConfig> {
    get_provider(name).ok_or_else(|| ConnectError::Config {
        message: format!("Unknown AI provider: {name}"),
    })
}

#[async_trait]
impl CompletionProvider for AiClient {
    fn name(&self) -> &str {
        self.provider.name
    }

    #[instrument(skip(self, prompt), fields(provider = self.provider.name, model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = self.build_request(prompt);

        let response = self
            .http
            .post(&self.endpoint)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 401 {
                return Err(self.error(
                    format!(
                        "Invalid {} API key. Check your {} environment variable.",
                        self.provider.display_name, self.provider.api_key_env
                    ),
                    Some(401),
                ));
            }
            let body = response.text().await.unwrap_or_default();
            return Err(self.error(
                format!("HTTP {}: {}", status.as_u16(), body.trim()),
                Some(status.as_u16()),
            ));
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body).map_err(|err| {
            self.error(
                format!("Unreadable completion body: {err}"),
                Some(status.as_u16()),
            )
        })?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| self.error("Response contained no choices".to_string(), None))?;

        debug!(chars = text.len(), "Received completion");
        Ok(text)
    }
}
