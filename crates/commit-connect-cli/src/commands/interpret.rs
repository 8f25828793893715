// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use commit_connect_core::CompletionProvider;
use commit_connect_core::ai::interpret_prompt;

use crate::commands::types::FiltersResult;

/// Interpret a prompt without touching GitHub.
pub async fn run(ai: &dyn CompletionProvider, prompt: &str) -> Result<FiltersResult> {
    let filters = interpret_prompt(ai, prompt).await?;
    Ok(FiltersResult {
        prompt: prompt.trim().to_string(),
        filters,
    })
}
