// SPDX-License-Identifier: Apache-2.0

//! Issue search: query construction, fetch, and label exclusion.

use std::fmt::Write as FmtWrite;

use bon::Builder;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{GitHubClient, SearchResponse, SortOrder, encode_query, qualifier_value};
use crate::ai::types::{Difficulty, PromptFilters};
use crate::error::Result;
use crate::utils::cutoff_string;

/// Issue state qualifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// `is:open`
    #[default]
    Open,
    /// `is:closed`
    Closed,
}

impl IssueState {
    /// Qualifier value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

/// Assignment qualifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentFilter {
    /// No qualifier.
    #[default]
    All,
    /// `assignee:*`
    Assigned,
    /// `no:assignee`
    Unassigned,
}

/// Sort fields accepted by issue search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSort {
    /// Comment count.
    Comments,
    /// Total reactions.
    Reactions,
    /// Reactions plus comments.
    Interactions,
    /// Creation time.
    Created,
    /// Last update.
    Updated,
}

impl IssueSort {
    /// Query parameter value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IssueSort::Comments => "comments",
            IssueSort::Reactions => "reactions",
            IssueSort::Interactions => "interactions",
            IssueSort::Created => "created",
            IssueSort::Updated => "updated",
        }
    }
}

/// Options that accompany the prompt filters in an issue search.
#[derive(Debug, Clone, Builder)]
pub struct IssueSearchParams {
    /// Issue state.
    #[builder(default)]
    pub state: IssueState,
    /// Assignment filter.
    #[builder(default)]
    pub assignment: AssignmentFilter,
    /// Only issues updated within this many days; 0 disables the clause.
    #[builder(default = 90)]
    pub recency_days: u32,
    /// Optional sort field.
    pub sort: Option<IssueSort>,
    /// Sort direction, used only with a sort field.
    #[builder(default)]
    pub order: SortOrder,
}

impl Default for IssueSearchParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLabel {
    /// Label name.
    pub name: String,
    /// Hex colour without `#`.
    #[serde(default)]
    pub color: Option<String>,
}

/// A GitHub user reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueUser {
    /// Login handle.
    pub login: String,
    /// Profile page URL.
    #[serde(default)]
    pub html_url: Option<String>,
}

/// An issue returned by `/search/issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Issue number within its repository.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Issue page URL.
    pub html_url: String,
    /// `open` or `closed`.
    pub state: String,
    /// Markdown body.
    #[serde(default)]
    pub body: Option<String>,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
    /// Assignees.
    #[serde(default)]
    pub assignees: Vec<IssueUser>,
    /// Author.
    #[serde(default)]
    pub user: Option<IssueUser>,
    /// Comment count.
    #[serde(default)]
    pub comments: u32,
    /// API URL of the owning repository.
    #[serde(default)]
    pub repository_url: String,
    /// Last update.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl IssueRecord {
    /// Label names in GitHub order.
    #[must_use]
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }

    /// Assignee logins in GitHub order.
    #[must_use]
    pub fn assignee_logins(&self) -> Vec<&str> {
        self.assignees.iter().map(|a| a.login.as_str()).collect()
    }

    /// Author login, if GitHub returned one.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }

    /// `owner/name` derived from `repository_url`.
    #[must_use]
    pub fn repository_full_name(&self) -> Option<String> {
        let mut parts = self.repository_url.trim_end_matches('/').rsplit('/');
        let name = parts.next().filter(|s| !s.is_empty())?;
        let owner = parts.next().filter(|s| !s.is_empty())?;
        Some(format!("{owner}/{name}"))
    }
}

/// Label qualifier for a difficulty level.
#[must_use]
pub fn difficulty_label(difficulty: Option<Difficulty>) -> Option<&'static str> {
    match difficulty {
        Some(Difficulty::Beginner) => Some("good first issue"),
        Some(Difficulty::Intermediate) => Some("help wanted"),
        Some(Difficulty::Advanced) | None => None,
    }
}

fn hyphenate(term: &str) -> String {
    term.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Build the issue search query.
///
/// Clauses in order: state, assignment, one `language:` per language, one
/// combined `label:` for frameworks/tools/other filters, the difficulty
/// label, and the `updated:` cutoff when `recency_days > 0`.
#[must_use]
pub fn build_issue_query(
    filters: &PromptFilters,
    params: &IssueSearchParams,
    today: NaiveDate,
) -> String {
    let mut query = format!("is:issue is:{}", params.state.as_str());

    match params.assignment {
        AssignmentFilter::All => {}
        AssignmentFilter::Assigned => query.push_str(" assignee:*"),
        AssignmentFilter::Unassigned => query.push_str(" no:assignee"),
    }

    for language in filters.languages.iter().filter(|l| !l.trim().is_empty()) {
        let _ = write!(query, " language:{}", qualifier_value(language));
    }

    let labels: Vec<String> = filters
        .frameworks
        .iter()
        .chain(&filters.tools)
        .chain(&filters.other_filters)
        .map(|t| hyphenate(t))
        .filter(|t| !t.is_empty())
        .collect();
    if !labels.is_empty() {
        let _ = write!(query, " label:{}", labels.join(","));
    }

    if let Some(label) = difficulty_label(filters.difficulty) {
        let _ = write!(query, " label:\"{label}\"");
    }

    if params.recency_days > 0 {
        let _ = write!(
            query,
            " updated:>={}",
            cutoff_string(today, params.recency_days)
        );
    }

    query
}

/// Build the issue search URL for a query.
///
/// `sort` and `order` are appended only when a sort field is set.
#[must_use]
pub fn build_issue_search_url(
    base_url: &str,
    query: &str,
    params: &IssueSearchParams,
    per_page: u32,
) -> String {
    let mut url = format!(
        "{base_url}/search/issues?q={}&per_page={per_page}",
        encode_query(query)
    );
    if let Some(sort) = params.sort {
        let _ = write!(
            url,
            "&sort={}&order={}",
            sort.as_str(),
            params.order.as_str()
        );
    }
    url
}

/// Fetch one page of issues from a prepared search URL.
#[instrument(skip(client))]
pub async fn fetch_issues(client: &GitHubClient, url: &str) -> Result<Vec<IssueRecord>> {
    let page: SearchResponse<IssueRecord> = client.get_json(url).await?;
    debug!(
        total = page.total_count,
        returned = page.items.len(),
        incomplete = page.incomplete_results,
        "Fetched issues"
    );
    Ok(page.items)
}

fn normalize_term(term: &str) -> String {
    term.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop issues carrying a label that matches an excluded term.
///
/// Matching is case-insensitive; spaces and hyphens are equivalent.
/// Returns the kept issues and the number removed.
#[must_use]
pub fn exclude_issues(issues: Vec<IssueRecord>, exclude: &[String]) -> (Vec<IssueRecord>, usize) {
    let terms: Vec<String> = exclude
        .iter()
        .map(|t| normalize_term(t))
        .filter(|t| !t.is_empty())
        .collect();
    if terms.is_empty() {
        return (issues, 0);
    }

    let before = issues.len();
    let kept: Vec<IssueRecord> = issues
        .into_iter()
        .filter(|issue| {
            !issue
                .labels
                .iter()
                .any(|label| terms.contains(&normalize_term(&label.name)))
        })
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")
    }

    fn filters(languages: &[&str]) -> PromptFilters {
        PromptFilters {
            languages: languages.iter().map(ToString::to_string).collect(),
            ..PromptFilters::default()
        }
    }

    #[test]
    fn test_beginner_python_query() {
        let mut f = filters(&["Python"]);
        f.difficulty = Some(Difficulty::Beginner);
        let query = build_issue_query(&f, &IssueSearchParams::default(), date());
        assert_eq!(
            query,
            "is:issue is:open language:Python label:\"good first issue\" updated:>=2024-04-01"
        );
    }

    #[test]
    fn test_assignment_clauses() {
        let f = filters(&[]);
        let assigned = IssueSearchParams::builder()
            .assignment(AssignmentFilter::Assigned)
            .recency_days(0)
            .build();
        let unassigned = IssueSearchParams::builder()
            .assignment(AssignmentFilter::Unassigned)
            .recency_days(0)
            .build();
        let all = IssueSearchParams::builder().recency_days(0).build();

        let q = build_issue_query(&f, &assigned, date());
        assert!(q.contains("assignee:*"));
        assert!(!q.contains("no:assignee"));

        let q = build_issue_query(&f, &unassigned, date());
        assert!(q.contains("no:assignee"));
        assert!(!q.contains("assignee:*"));

        let q = build_issue_query(&f, &all, date());
        assert_eq!(q, "is:issue is:open");
    }

    #[test]
    fn test_label_clause_combines_and_hyphenates() {
        let f = PromptFilters {
            languages: vec!["Rust".to_string(), "Go".to_string()],
            frameworks: vec!["tokio".to_string()],
            tools: vec!["GitHub Actions".to_string()],
            other_filters: vec!["documentation".to_string()],
            difficulty: Some(Difficulty::Intermediate),
            ..PromptFilters::default()
        };
        let params = IssueSearchParams::builder()
            .state(IssueState::Closed)
            .recency_days(0)
            .build();
        assert_eq!(
            build_issue_query(&f, &params, date()),
            "is:issue is:closed language:Rust language:Go label:tokio,GitHub-Actions,documentation label:\"help wanted\""
        );
    }

    #[test]
    fn test_advanced_difficulty_adds_no_label() {
        let mut f = filters(&["C"]);
        f.difficulty = Some(Difficulty::Advanced);
        let params = IssueSearchParams::builder().recency_days(0).build();
        assert_eq!(
            build_issue_query(&f, &params, date()),
            "is:issue is:open language:C"
        );
    }

    #[test]
    fn test_search_url_sort_only_when_set() {
        let params = IssueSearchParams::default();
        let url = build_issue_search_url("https://api.github.com", "is:issue", &params, 30);
        assert_eq!(
            url,
            "https://api.github.com/search/issues?q=is%3Aissue&per_page=30"
        );

        let params = IssueSearchParams::builder()
            .sort(IssueSort::Comments)
            .order(SortOrder::Asc)
            .build();
        let url = build_issue_search_url("https://api.github.com", "is:issue", &params, 30);
        assert!(url.ends_with("&sort=comments&order=asc"));
    }

    #[test]
    fn test_query_survives_encoding() {
        let mut f = filters(&["C#"]);
        f.difficulty = Some(Difficulty::Beginner);
        let query = build_issue_query(&f, &IssueSearchParams::default(), date());
        let encoded = encode_query(&query);
        let decoded = percent_encoding::percent_decode_str(&encoded)
            .decode_utf8()
            .expect("utf8");
        assert_eq!(decoded, query);
    }

    fn issue(number: u64, labels: &[&str]) -> IssueRecord {
        IssueRecord {
            number,
            title: format!("Issue {number}"),
            html_url: format!("https://github.com/o/r/issues/{number}"),
            state: "open".to_string(),
            body: None,
            labels: labels
                .iter()
                .map(|l| IssueLabel {
                    name: (*l).to_string(),
                    color: None,
                })
                .collect(),
            assignees: Vec::new(),
            user: None,
            comments: 0,
            repository_url: "https://api.github.com/repos/o/r".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_exclude_issues_matches_labels_loosely() {
        let issues = vec![
            issue(1, &["bug", "good first issue"]),
            issue(2, &["Needs-Design"]),
            issue(3, &["enhancement"]),
        ];
        let (kept, removed) = exclude_issues(issues, &["needs design".to_string()]);
        assert_eq!(removed, 1);
        assert_eq!(
            kept.iter().map(|i| i.number).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_exclude_issues_noop_without_terms() {
        let (kept, removed) = exclude_issues(vec![issue(1, &["bug"])], &[" ".to_string()]);
        assert_eq!(kept.len(), 1);
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_repository_full_name() {
        assert_eq!(issue(1, &[]).repository_full_name().as_deref(), Some("o/r"));
    }
}
