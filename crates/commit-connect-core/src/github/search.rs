// SPDX-License-Identifier: Apache-2.0

//! Public repository search (`GET /search/repositories`).
//!
//! One request per selected language, awaited in sequence. A language whose
//! request fails is logged and reported in [`RepoSearchOutcome::failures`];
//! the remaining languages still run.

use std::fmt::Write as FmtWrite;

use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::repos::RepoSummary;
use super::{GitHubClient, SearchResponse, SortOrder, encode_query, qualifier_value};
use crate::error::{ConnectError, Result};
use crate::utils::cutoff_string;

/// Sort fields accepted by repository search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepoSort {
    /// Stargazer count.
    Stars,
    /// Fork count.
    Forks,
    /// Last update.
    Updated,
    /// Number of open `help-wanted` issues.
    HelpWantedIssues,
}

impl RepoSort {
    /// Query parameter value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RepoSort::Stars => "stars",
            RepoSort::Forks => "forks",
            RepoSort::Updated => "updated",
            RepoSort::HelpWantedIssues => "help-wanted-issues",
        }
    }
}

/// Filters for a repository search.
#[derive(Debug, Clone, Builder)]
pub struct RepoSearchFilter {
    /// Languages to search, one request each.
    #[builder(default)]
    pub languages: Vec<String>,
    /// Minimum stargazer count.
    #[builder(default = 50)]
    pub min_stars: u32,
    /// Only repositories pushed within this many days.
    #[builder(default = 30)]
    pub recency_days: u32,
    /// Optional sort field.
    pub sort: Option<RepoSort>,
    /// Sort direction, used only with a sort field.
    #[builder(default)]
    pub order: SortOrder,
}

/// A language whose search request failed.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageFailure {
    /// Language that failed.
    pub language: String,
    /// HTTP status, when the failure had one.
    pub status: Option<u16>,
    /// Error description.
    pub message: String,
}

/// Merged results of a multi-language search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoSearchOutcome {
    /// Results of every successful language, in request order.
    pub repositories: Vec<RepoSummary>,
    /// Languages whose request failed.
    pub failures: Vec<LanguageFailure>,
}

/// Build the query for one language.
///
/// `language:<L> stars:>=<min_stars> pushed:>=<cutoff>`
#[must_use]
pub fn build_repo_search_query(language: &str, min_stars: u32, cutoff: &str) -> String {
    let mut query = format!("language:{}", qualifier_value(language));
    let _ = write!(query, " stars:>={min_stars}");
    let _ = write!(query, " pushed:>={cutoff}");
    query
}

/// Build the full request URL for one language.
#[must_use]
pub fn build_repo_search_url(
    base_url: &str,
    query: &str,
    sort: Option<RepoSort>,
    order: SortOrder,
    per_page: u32,
) -> String {
    let mut url = format!(
        "{base_url}/search/repositories?q={}&per_page={per_page}",
        encode_query(query)
    );
    if let Some(sort) = sort {
        let _ = write!(url, "&sort={}&order={}", sort.as_str(), order.as_str());
    }
    url
}

/// Search public repositories for each selected language.
///
/// # Errors
///
/// Returns [`ConnectError::MissingInput`] for an empty language list, before
/// any request is sent. Per-language failures do not abort the search.
#[instrument(skip(client, filter), fields(languages = filter.languages.len()))]
pub async fn search_repositories(
    client: &GitHubClient,
    filter: &RepoSearchFilter,
    per_page: u32,
    today: NaiveDate,
) -> Result<RepoSearchOutcome> {
    let languages: Vec<&str> = filter
        .languages
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    if languages.is_empty() {
        return Err(ConnectError::missing("languages"));
    }

    let cutoff = cutoff_string(today, filter.recency_days);
    let mut outcome = RepoSearchOutcome::default();

    for language in languages {
        let query = build_repo_search_query(language, filter.min_stars, &cutoff);
        let url = build_repo_search_url(
            client.base_url(),
            &query,
            filter.sort,
            filter.order,
            per_page,
        );
        debug!(%query, "Searching repositories");

        match client.get_json::<SearchResponse<RepoSummary>>(&url).await {
            Ok(page) => {
                debug!(
                    language,
                    count = page.items.len(),
                    "Language search succeeded"
                );
                outcome.repositories.extend(page.items);
            }
            Err(err) => {
                warn!(language, error = %err, "Repository search failed for language");
                outcome.failures.push(LanguageFailure {
                    language: language.to_string(),
                    status: err.status(),
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(outcome)
}
