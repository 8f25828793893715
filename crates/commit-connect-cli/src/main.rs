// SPDX-License-Identifier: Apache-2.0

//! Commit-Connect - find open source issues that fit you.
//!
//! A CLI dashboard over the GitHub API: profile and language statistics,
//! repository search, and AI-assisted issue recommendations.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use commit_connect_core::ai::registry;
use commit_connect_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> Result<()> {
    // Keys such as GEMINI_API_KEY may live in a local .env file.
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);

    let mut config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    if let Some(provider) = &cli.provider {
        let entry = registry::get_provider(provider)
            .ok_or_else(|| anyhow::anyhow!("Unknown AI provider: {provider}"))?;
        if *provider != config.ai.provider && cli.model.is_none() {
            config.ai.model = entry.default_model.to_string();
        }
        config.ai.provider.clone_from(provider);
        debug!("Overriding AI provider to: {provider}");
    }

    if let Some(model) = &cli.model {
        config.ai.model.clone_from(model);
        debug!("Overriding AI model to: {model}");
    }

    match commands::run(cli.command, output_ctx, &config, cli.token.as_deref()).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", errors::format_error(&e));
            std::process::exit(1);
        }
    }
}
