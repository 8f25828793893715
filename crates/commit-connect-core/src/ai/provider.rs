// SPDX-License-Identifier: Apache-2.0

//! Completion provider seam.
//!
//! Everything that needs an LLM goes through [`CompletionProvider`], so the
//! prompt interpreter and summarizer can be driven by the HTTP client or by
//! a scripted fake in tests.

use async_trait::async_trait;

use crate::error::Result;

/// A service that turns a prompt into completion text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider (e.g., "gemini", "openrouter").
    fn name(&self) -> &str;

    /// Send one prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
