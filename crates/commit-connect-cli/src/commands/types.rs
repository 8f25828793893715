// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.
//!
//! Handlers return data; the `output` module renders it.

use commit_connect_core::{
    IssueRecommendations, IssueRecord, LanguageHistogram, PromptFilters, RepoSearchOutcome,
    RepoSummary, TokenSource, UserProfile,
};
use serde::Serialize;

/// Result from the auth status command.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatusResult {
    /// Whether a token was found.
    pub authenticated: bool,
    /// Where the token came from.
    pub method: Option<TokenSource>,
    /// GitHub login, when the token was accepted.
    pub username: Option<String>,
}

/// Result from the profile command.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResult {
    /// The authenticated user.
    pub profile: UserProfile,
    /// Most used languages, when repositories were loaded.
    pub top_languages: Vec<String>,
}

/// Result from the repos command.
#[derive(Debug, Clone, Serialize)]
pub struct ReposResult {
    /// Repositories, possibly limited.
    pub repositories: Vec<RepoSummary>,
    /// Total repositories fetched.
    pub total: usize,
    /// Language breakdown over all fetched repositories.
    pub histogram: LanguageHistogram,
}

/// Result from the search command.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Languages searched.
    pub languages: Vec<String>,
    /// Minimum stars applied.
    pub min_stars: u32,
    /// Recency window applied.
    pub recency_days: u32,
    /// Merged results and per-language failures.
    #[serde(flatten)]
    pub outcome: RepoSearchOutcome,
}

/// Result from the interpret command.
#[derive(Debug, Clone, Serialize)]
pub struct FiltersResult {
    /// The prompt as given.
    pub prompt: String,
    /// Extracted filters.
    pub filters: PromptFilters,
}

/// An issue with its AI explanation.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedIssue {
    /// 1-based position in the result list.
    pub position: usize,
    /// The issue.
    pub issue: IssueRecord,
    /// Markdown explanation.
    pub explanation: String,
}

/// Result from the issues command.
#[derive(Debug, Clone, Serialize)]
pub struct IssuesResult {
    /// Filters, query and issues.
    #[serde(flatten)]
    pub recommendations: IssueRecommendations,
    /// Explanation requested with `--explain`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explained: Option<ExplainedIssue>,
}
