// SPDX-License-Identifier: Apache-2.0

//! The authenticated user's repositories and their language histogram.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::GitHubClient;
use super::profile::as_auth_failure;
use crate::error::Result;

/// Summary of a repository as returned by list and search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    /// Repository id.
    pub id: u64,
    /// Short name.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Repository page URL.
    pub html_url: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language.
    #[serde(default)]
    pub language: Option<String>,
    /// Stargazer count.
    #[serde(default)]
    pub stargazers_count: u32,
    /// Fork count.
    #[serde(default)]
    pub forks_count: u32,
    /// Open issue count.
    #[serde(default)]
    pub open_issues_count: u32,
    /// Last metadata update.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Last push.
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

impl RepoSummary {
    /// Primary language when GitHub reports a non-empty one.
    #[must_use]
    pub fn primary_language(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// Fetch every repository of the token's owner, following pages.
///
/// Stops at the first short page or after `github.max_pages` pages.
#[instrument(skip(client))]
pub async fn fetch_user_repos(client: &GitHubClient) -> Result<Vec<RepoSummary>> {
    let per_page = client.per_page();
    let mut repos = Vec::new();

    for page in 1..=client.max_pages() {
        let url = format!(
            "{}/user/repos?sort=updated&per_page={per_page}&page={page}",
            client.base_url()
        );
        let batch: Vec<RepoSummary> = client.get_json(&url).await.map_err(as_auth_failure)?;
        let count = batch.len();
        debug!(page, count, "Fetched repository page");
        repos.extend(batch);

        if count < per_page as usize {
            break;
        }
    }

    Ok(repos)
}

/// Number of repositories using one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    /// Language name.
    pub language: String,
    /// Number of repositories.
    pub count: usize,
}

/// Repository counts per primary language.
///
/// Ordered by descending count; ties keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageHistogram(Vec<LanguageCount>);

impl LanguageHistogram {
    /// Count repositories per language in a single pass.
    ///
    /// Repositories without a language are skipped.
    #[must_use]
    pub fn from_repos(repos: &[RepoSummary]) -> Self {
        let mut counts: Vec<LanguageCount> = Vec::new();
        for language in repos.iter().filter_map(RepoSummary::primary_language) {
            match counts.iter_mut().find(|c| c.language == language) {
                Some(entry) => entry.count += 1,
                None => counts.push(LanguageCount {
                    language: language.to_string(),
                    count: 1,
                }),
            }
        }
        // stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        Self(counts)
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[LanguageCount] {
        &self.0
    }

    /// Number of distinct languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no repository had a language.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(|c| c.count).sum()
    }

    /// Count for one language, exact match.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|c| c.language == language)
            .map(|c| c.count)
    }

    /// The `n` most used languages.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<&str> {
        self.0.iter().take(n).map(|c| c.language.as_str()).collect()
    }

    /// Percentage of counted repositories using `language`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn share(&self, language: &str) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(language).unwrap_or(0) as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(id: u64, language: Option<&str>) -> RepoSummary {
        RepoSummary {
            id,
            name: format!("repo-{id}"),
            full_name: format!("octocat/repo-{id}"),
            html_url: format!("https://github.com/octocat/repo-{id}"),
            description: None,
            language: language.map(str::to_string),
            stargazers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            updated_at: None,
            pushed_at: None,
        }
    }

    #[test]
    fn test_histogram_counts_and_order() {
        let repos = vec![
            repo(1, Some("Go")),
            repo(2, Some("Rust")),
            repo(3, Some("Rust")),
            repo(4, None),
            repo(5, Some("Python")),
            repo(6, Some("")),
            repo(7, Some("Go")),
            repo(8, Some("Rust")),
        ];
        let hist = LanguageHistogram::from_repos(&repos);

        assert_eq!(hist.len(), 3);
        assert_eq!(hist.total(), 6);
        assert_eq!(hist.top(3), vec!["Rust", "Go", "Python"]);
        assert_eq!(hist.get("Go"), Some(2));
        assert_eq!(hist.get("Haskell"), None);
    }

    #[test]
    fn test_histogram_ties_keep_first_seen_order() {
        let repos = vec![
            repo(1, Some("TypeScript")),
            repo(2, Some("C")),
            repo(3, Some("Zig")),
        ];
        let hist = LanguageHistogram::from_repos(&repos);
        assert_eq!(hist.top(10), vec!["TypeScript", "C", "Zig"]);
    }

    #[test]
    fn test_histogram_k_entries_sum_to_n() {
        let languages = ["A", "B", "C", "D"];
        let repos: Vec<_> = (0..40)
            .map(|i| repo(i, Some(languages[(i as usize * 7) % languages.len()])))
            .collect();
        let hist = LanguageHistogram::from_repos(&repos);
        assert_eq!(hist.len(), languages.len());
        assert_eq!(hist.total(), repos.len());
    }

    #[test]
    fn test_histogram_empty_and_share() {
        let hist = LanguageHistogram::from_repos(&[repo(1, None)]);
        assert!(hist.is_empty());
        assert!(hist.share("Rust").abs() < f64::EPSILON);

        let hist = LanguageHistogram::from_repos(&[
            repo(1, Some("Rust")),
            repo(2, Some("Rust")),
            repo(3, Some("Go")),
            repo(4, Some("C")),
        ]);
        assert!((hist.share("Rust") - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_serializes_as_list() {
        let hist = LanguageHistogram::from_repos(&[repo(1, Some("Rust"))]);
        let json = serde_json::to_string(&hist).expect("serialize");
        assert_eq!(json, r#"[{"language":"Rust","count":1}]"#);
    }

    #[test]
    fn test_repo_summary_deserializes_github_payload() {
        let json = r#"{
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "html_url": "https://github.com/octocat/Hello-World",
            "description": "This your first repo!",
            "language": null,
            "stargazers_count": 80,
            "forks_count": 9,
            "open_issues_count": 0,
            "updated_at": "2011-01-26T19:14:43Z",
            "pushed_at": "2011-01-26T19:06:43Z",
            "private": false
        }"#;
        let repo: RepoSummary = serde_json::from_str(json).expect("valid");
        assert_eq!(repo.full_name, "octocat/Hello-World");
        assert!(repo.primary_language().is_none());
        assert!(repo.updated_at.is_some());
    }
}
