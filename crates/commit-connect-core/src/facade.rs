// SPDX-License-Identifier: Apache-2.0

//! High-level operations for the CLI and other front ends.
//!
//! Each function performs one user action against a [`Session`]: a sequential
//! pass of zero or more HTTP calls, with results stored in the session's
//! slots and caches.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::ai::{CompletionProvider, PromptFilters, interpret_prompt, summarize_issue};
use crate::error::Result;
use crate::github::issues::{
    IssueRecord, IssueSearchParams, build_issue_query, build_issue_search_url, exclude_issues,
    fetch_issues,
};
use crate::github::profile::{UserProfile, fetch_profile};
use crate::github::repos::{LanguageHistogram, RepoSummary, fetch_user_repos};
use crate::github::search::{self, RepoSearchFilter, RepoSearchOutcome};
use crate::session::Session;
use crate::utils::today;

/// The user's repositories with their language histogram.
#[derive(Debug, Clone, Serialize)]
pub struct RepoOverview {
    /// Repositories, most recently updated first.
    pub repositories: Vec<RepoSummary>,
    /// Repository count per primary language.
    pub histogram: LanguageHistogram,
}

/// Issues found for a set of filters.
#[derive(Debug, Clone, Serialize)]
pub struct IssueResults {
    /// Search query sent to GitHub.
    pub query: String,
    /// Request URL; also the cache key.
    pub url: String,
    /// Issues left after exclusions.
    pub issues: Vec<IssueRecord>,
    /// Issues dropped by exclusion terms.
    pub excluded: usize,
    /// Whether the issues came from the session cache.
    pub cached: bool,
}

/// Issue recommendations for a free-text prompt.
#[derive(Debug, Clone, Serialize)]
pub struct IssueRecommendations {
    /// Filters the prompt was interpreted into.
    pub filters: PromptFilters,
    /// The matching issues.
    #[serde(flatten)]
    pub results: IssueResults,
}

/// Fetch the profile and keep it in the session.
#[instrument(skip(session))]
pub async fn load_profile(session: &mut Session) -> Result<UserProfile> {
    let profile = fetch_profile(session.client()).await?;
    session.set_profile(profile.clone());
    Ok(profile)
}

/// Fetch the repository list, keep it in the session, and tally languages.
#[instrument(skip(session))]
pub async fn load_repositories(session: &mut Session) -> Result<RepoOverview> {
    let repositories = fetch_user_repos(session.client()).await?;
    let histogram = LanguageHistogram::from_repos(&repositories);
    session.set_repositories(repositories.clone());
    Ok(RepoOverview {
        repositories,
        histogram,
    })
}

/// Histogram of the repositories already held by the session, fetching them
/// first if needed.
pub async fn language_histogram(session: &mut Session) -> Result<LanguageHistogram> {
    if let Some(repos) = session.repositories() {
        return Ok(LanguageHistogram::from_repos(repos));
    }
    Ok(load_repositories(session).await?.histogram)
}

/// Search public repositories, one request per language.
#[instrument(skip(session, filter))]
pub async fn search_repositories(
    session: &Session,
    filter: &RepoSearchFilter,
) -> Result<RepoSearchOutcome> {
    search::search_repositories(
        session.client(),
        filter,
        session.limits().search_per_page,
        today(),
    )
    .await
}

/// Interpret a prompt, reusing the session's cached result for the same text.
#[instrument(skip(session, provider, text))]
pub async fn interpret(
    session: &mut Session,
    provider: &dyn CompletionProvider,
    text: &str,
) -> Result<PromptFilters> {
    let key = text.trim();
    if let Some(filters) = session.parsed_prompts.get(key) {
        debug!("Parsed prompt cache hit");
        return Ok(filters);
    }

    let filters = interpret_prompt(provider, text).await?;
    session.parsed_prompts.insert(key, filters.clone());
    Ok(filters)
}

/// Search issues for explicit filters, reusing cached results per URL.
///
/// Issues carrying a label matched by `filters.exclude` are dropped after the
/// fetch; the query itself is not affected by exclusions.
#[instrument(skip(session, filters, params))]
pub async fn find_issues(
    session: &mut Session,
    filters: &PromptFilters,
    params: &IssueSearchParams,
) -> Result<IssueResults> {
    let query = build_issue_query(filters, params, today());
    let url = build_issue_search_url(
        session.client().base_url(),
        &query,
        params,
        session.limits().issues_per_page,
    );

    let (issues, cached) = match session.issue_results.get(&url) {
        Some(issues) => {
            debug!(%url, "Issue results cache hit");
            (issues, true)
        }
        None => {
            let issues = fetch_issues(session.client(), &url).await?;
            session.issue_results.insert(url.clone(), issues.clone());
            (issues, false)
        }
    };

    let (issues, excluded) = exclude_issues(issues, &filters.exclude);
    Ok(IssueResults {
        query,
        url,
        issues,
        excluded,
        cached,
    })
}

/// Interpret a prompt and fetch the matching issues.
pub async fn recommend_issues(
    session: &mut Session,
    provider: &dyn CompletionProvider,
    text: &str,
    params: &IssueSearchParams,
) -> Result<IssueRecommendations> {
    let filters = interpret(session, provider, text).await?;
    let results = find_issues(session, &filters, params).await?;
    Ok(IssueRecommendations { filters, results })
}

/// Explain an issue, reusing the session's cached explanation for its URL.
#[instrument(skip(session, provider, issue), fields(url = %issue.html_url))]
pub async fn explain_issue(
    session: &mut Session,
    provider: &dyn CompletionProvider,
    issue: &IssueRecord,
) -> Result<String> {
    if let Some(summary) = session.summaries.get(&issue.html_url) {
        debug!("Explanation cache hit");
        return Ok(summary);
    }

    let summary = summarize_issue(provider, &issue.title, issue.body.as_deref()).await?;
    session
        .summaries
        .insert(issue.html_url.clone(), summary.clone());
    Ok(summary)
}
