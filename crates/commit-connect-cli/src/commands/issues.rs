// SPDX-License-Identifier: Apache-2.0

use anyhow::{Result, bail};
use commit_connect_core::{
    AppConfig, CompletionProvider, IssueRecord, IssueSearchParams, Session, facade,
};

use crate::cli::IssuesArgs;
use crate::commands::types::{ExplainedIssue, IssuesResult};

/// Search parameters from flags, falling back to configuration.
pub fn search_params(args: &IssuesArgs, config: &AppConfig) -> IssueSearchParams {
    IssueSearchParams::builder()
        .state(args.state.into())
        .assignment(args.assignment.into())
        .recency_days(args.days.unwrap_or(config.issues.recency_days))
        .maybe_sort(args.sort.map(Into::into))
        .order(args.order.into())
        .build()
}

/// Explain the issue at a 1-based position.
pub async fn explain_at(
    session: &mut Session,
    ai: &dyn CompletionProvider,
    issues: &[IssueRecord],
    position: usize,
) -> Result<ExplainedIssue> {
    let Some(issue) = position.checked_sub(1).and_then(|i| issues.get(i)) else {
        bail!(
            "No issue at position {position}; {} result(s) available",
            issues.len()
        );
    };
    let explanation = facade::explain_issue(session, ai, issue).await?;
    Ok(ExplainedIssue {
        position,
        issue: issue.clone(),
        explanation,
    })
}

/// Recommend issues for a prompt, optionally explaining one of them.
pub async fn run(
    session: &mut Session,
    ai: &dyn CompletionProvider,
    args: &IssuesArgs,
    config: &AppConfig,
) -> Result<IssuesResult> {
    let params = search_params(args, config);
    let recommendations = facade::recommend_issues(session, ai, &args.prompt, &params).await?;

    let explained = match args.explain {
        Some(position) => {
            Some(explain_at(session, ai, &recommendations.results.issues, position).await?)
        }
        None => None,
    };

    Ok(IssuesResult {
        recommendations,
        explained,
    })
}
