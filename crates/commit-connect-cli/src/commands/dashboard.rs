// SPDX-License-Identifier: Apache-2.0

//! Interactive dashboard.
//!
//! A menu loop over one [`Session`], so profile data, parsed prompts, issue
//! results and explanations are reused between actions. A failing action
//! prints its error and returns to the menu.

use std::io::IsTerminal;

use anyhow::{Context, Result, bail};
use commit_connect_core::{
    AiClient, AppConfig, AssignmentFilter, IssueRecord, IssueSearchParams, IssueState,
    RepoSearchFilter, Session, facade,
};
use console::style;
use dialoguer::{Input, Select};

use crate::cli::OutputContext;
use crate::commands::types::{IssuesResult, SearchResult};
use crate::commands::{ai_client, profile, repos, with_spinner};
use crate::errors::format_error;
use crate::output;

const MENU: &[&str] = &[
    "Profile",
    "My repositories",
    "Search repositories",
    "Find issues",
    "Explain an issue",
    "Clear session cache",
    "Quit",
];

struct Dashboard<'a> {
    ctx: &'a OutputContext,
    config: &'a AppConfig,
    session: &'a mut Session,
    ai: Option<AiClient>,
    last_issues: Vec<IssueRecord>,
}

/// Run the dashboard until the user quits.
pub async fn run(ctx: &OutputContext, config: &AppConfig, session: &mut Session) -> Result<()> {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        bail!("The dashboard requires an interactive terminal. Use the other subcommands instead.");
    }

    let mut dashboard = Dashboard {
        ctx,
        config,
        session,
        ai: None,
        last_issues: Vec::new(),
    };

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Commit-Connect")
            .items(MENU)
            .default(0)
            .interact()
            .context("Failed to read menu selection")?;

        let outcome = match choice {
            0 => dashboard.profile().await,
            1 => dashboard.repositories().await,
            2 => dashboard.search().await,
            3 => dashboard.issues().await,
            4 => dashboard.explain().await,
            5 => {
                dashboard.session.reset();
                dashboard.last_issues.clear();
                println!("{}", style("Session cache cleared.").green());
                Ok(())
            }
            _ => return Ok(()),
        };

        if let Err(e) = outcome {
            eprintln!("{} {}", style("Error:").red().bold(), format_error(&e));
        }
    }
}

impl Dashboard<'_> {
    fn ensure_ai(&mut self) -> Result<()> {
        if self.ai.is_none() {
            self.ai = Some(ai_client(self.config)?);
        }
        Ok(())
    }

    async fn profile(&mut self) -> Result<()> {
        let result =
            with_spinner(self.ctx, "Fetching profile...", profile::run(self.session)).await?;
        output::render(&result, self.ctx)
    }

    async fn repositories(&mut self) -> Result<()> {
        let result = with_spinner(
            self.ctx,
            "Fetching repositories...",
            repos::run(self.session, None),
        )
        .await?;
        output::render(&result, self.ctx)
    }

    async fn search(&mut self) -> Result<()> {
        let suggested = match self.session.repositories() {
            Some(repos) => commit_connect_core::LanguageHistogram::from_repos(repos)
                .top(3)
                .join(", "),
            None => String::new(),
        };

        let languages: String = Input::new()
            .with_prompt("Languages (comma separated)")
            .with_initial_text(suggested)
            .interact_text()
            .context("Failed to read languages")?;
        let min_stars: u32 = Input::new()
            .with_prompt("Minimum stars")
            .default(self.config.search.min_stars)
            .interact_text()
            .context("Failed to read minimum stars")?;
        let days: u32 = Input::new()
            .with_prompt("Pushed within days")
            .default(self.config.search.recency_days)
            .interact_text()
            .context("Failed to read recency window")?;

        let filter = RepoSearchFilter::builder()
            .languages(
                languages
                    .split(',')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
            .min_stars(min_stars)
            .recency_days(days)
            .build();

        let outcome = with_spinner(
            self.ctx,
            "Searching repositories...",
            facade::search_repositories(self.session, &filter),
        )
        .await?;

        let result = SearchResult {
            languages: filter.languages,
            min_stars,
            recency_days: days,
            outcome,
        };
        output::render(&result, self.ctx)
    }

    async fn issues(&mut self) -> Result<()> {
        let prompt: String = Input::new()
            .with_prompt("What would you like to work on?")
            .interact_text()
            .context("Failed to read prompt")?;

        let state = match Select::new()
            .with_prompt("State")
            .items(&["Open", "Closed"])
            .default(0)
            .interact()
            .context("Failed to read state")?
        {
            1 => IssueState::Closed,
            _ => IssueState::Open,
        };
        let assignment = match Select::new()
            .with_prompt("Assignment")
            .items(&["All", "Unassigned", "Assigned"])
            .default(0)
            .interact()
            .context("Failed to read assignment")?
        {
            1 => AssignmentFilter::Unassigned,
            2 => AssignmentFilter::Assigned,
            _ => AssignmentFilter::All,
        };

        let params = IssueSearchParams::builder()
            .state(state)
            .assignment(assignment)
            .recency_days(self.config.issues.recency_days)
            .build();

        self.ensure_ai()?;
        let Some(ai) = self.ai.as_ref() else {
            bail!("AI client was not initialised");
        };
        let recommendations = with_spinner(
            self.ctx,
            "Finding issues...",
            facade::recommend_issues(self.session, ai, &prompt, &params),
        )
        .await?;

        self.last_issues.clone_from(&recommendations.results.issues);
        let result = IssuesResult {
            recommendations,
            explained: None,
        };
        output::render(&result, self.ctx)
    }

    async fn explain(&mut self) -> Result<()> {
        if self.last_issues.is_empty() {
            println!("{}", style("Find issues first.").yellow());
            return Ok(());
        }

        let titles: Vec<String> = self
            .last_issues
            .iter()
            .map(|i| format!("#{} {}", i.number, i.title))
            .collect();
        let index = Select::new()
            .with_prompt("Which issue?")
            .items(&titles)
            .default(0)
            .interact()
            .context("Failed to read issue selection")?;

        self.ensure_ai()?;
        let Some(ai) = self.ai.as_ref() else {
            bail!("AI client was not initialised");
        };
        let issues = self.last_issues.clone();
        let explained = with_spinner(
            self.ctx,
            "Explaining issue...",
            super::issues::explain_at(self.session, ai, &issues, index + 1),
        )
        .await?;
        output::render(&explained, self.ctx)
    }
}
