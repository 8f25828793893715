// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the Commit-Connect CLI.

pub mod auth;
pub mod completion;
pub mod dashboard;
pub mod interpret;
pub mod issues;
pub mod profile;
pub mod repos;
pub mod search;
pub mod types;

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use commit_connect_core::{AiClient, AppConfig, ConnectError, Session, resolve_token};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::cli::{AuthCommand, Commands, OutputContext};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if !ctx.is_interactive() {
        return None;
    }
    let s = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        s.set_style(style);
    }
    s.set_message(message.to_string());
    s.enable_steady_tick(Duration::from_millis(100));
    Some(s)
}

/// Await a future behind a spinner, clearing it afterwards.
pub(crate) async fn with_spinner<F: Future>(
    ctx: &OutputContext,
    message: &str,
    fut: F,
) -> F::Output {
    let spinner = maybe_spinner(ctx, message);
    let out = fut.await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    out
}

/// Resolve a token and open a session with it.
pub(crate) fn open_session(config: &AppConfig, token: Option<&str>) -> Result<Session> {
    let (token, source) = resolve_token(token).ok_or(ConnectError::NotAuthenticated)?;
    debug!(%source, "Resolved GitHub token");
    Ok(Session::open(token, config)?)
}

/// Build the AI client from configuration.
pub(crate) fn ai_client(config: &AppConfig) -> Result<AiClient> {
    Ok(AiClient::new(&config.ai)?)
}

/// Dispatch to the appropriate command handler.
pub async fn run(
    command: Commands,
    ctx: OutputContext,
    config: &AppConfig,
    token: Option<&str>,
) -> Result<()> {
    match command {
        Commands::Auth(AuthCommand::Status) => {
            let result =
                with_spinner(&ctx, "Checking token...", auth::run_status(config, token)).await;
            output::render(&result, &ctx)
        }

        Commands::Profile => {
            let mut session = open_session(config, token)?;
            let result =
                with_spinner(&ctx, "Fetching profile...", profile::run(&mut session)).await?;
            output::render(&result, &ctx)
        }

        Commands::Repos { limit } => {
            let mut session = open_session(config, token)?;
            let result = with_spinner(
                &ctx,
                "Fetching repositories...",
                repos::run(&mut session, limit),
            )
            .await?;
            output::render(&result, &ctx)
        }

        Commands::Search(args) => {
            let mut session = open_session(config, token)?;
            let result = with_spinner(
                &ctx,
                "Searching repositories...",
                search::run(&mut session, &args, config),
            )
            .await?;
            output::render(&result, &ctx)
        }

        Commands::Interpret { prompt } => {
            let ai = ai_client(config)?;
            let result =
                with_spinner(&ctx, "Interpreting prompt...", interpret::run(&ai, &prompt)).await?;
            output::render(&result, &ctx)
        }

        Commands::Issues(args) => {
            let mut session = open_session(config, token)?;
            let ai = ai_client(config)?;
            let result = with_spinner(
                &ctx,
                "Finding issues...",
                issues::run(&mut session, &ai, &args, config),
            )
            .await?;
            output::render(&result, &ctx)
        }

        Commands::Dashboard => {
            let mut session = open_session(config, token)?;
            dashboard::run(&ctx, config, &mut session).await
        }

        Commands::Completion { shell } => completion::run_generate(shell),
    }
}
