// SPDX-License-Identifier: Apache-2.0

//! AI integration: prompt interpretation and issue explanations.
//!
//! Providers sit behind the [`CompletionProvider`] trait; [`AiClient`] is the
//! HTTP implementation for every entry in the [`registry`].

pub mod client;
pub mod prompt;
pub mod provider;
pub mod registry;
pub mod summary;
pub mod types;

pub use client::AiClient;
pub use prompt::{build_filter_prompt, extract_json_object, interpret_prompt, parse_filters};
pub use provider::CompletionProvider;
pub use summary::{build_summary_prompt, summarize_issue};
pub use types::{Difficulty, PromptFilters};
