// SPDX-License-Identifier: Apache-2.0

//! Per-user session state.
//!
//! A [`Session`] owns the GitHub client (and with it the bearer token), the
//! last fetched profile and repository list, and the caches for issue
//! results, parsed prompts and issue explanations. It is owned by a single
//! caller and mutated through `&mut self`.

use secrecy::SecretString;

use crate::ai::PromptFilters;
use crate::cache::SessionCache;
use crate::config::AppConfig;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::github::issues::IssueRecord;
use crate::github::profile::UserProfile;
use crate::github::repos::RepoSummary;

/// Result limits copied from configuration when the session opens.
#[derive(Debug, Clone, Copy)]
pub struct SessionLimits {
    /// Per-language results for repository search.
    pub search_per_page: u32,
    /// Results for issue search.
    pub issues_per_page: u32,
}

/// State for one authenticated user.
#[derive(Debug)]
pub struct Session {
    client: GitHubClient,
    limits: SessionLimits,
    profile: Option<UserProfile>,
    repositories: Option<Vec<RepoSummary>>,
    pub(crate) issue_results: SessionCache<Vec<IssueRecord>>,
    pub(crate) parsed_prompts: SessionCache<PromptFilters>,
    pub(crate) summaries: SessionCache<String>,
}

impl Session {
    /// Open a session for a token using the configured GitHub settings.
    pub fn open(token: SecretString, config: &AppConfig) -> Result<Self> {
        let client = GitHubClient::new(token, &config.github)?;
        Ok(Self::with_client(client, config))
    }

    /// Open a session around an existing client.
    #[must_use]
    pub fn with_client(client: GitHubClient, config: &AppConfig) -> Self {
        let ttl = config.cache.ttl_minutes;
        Self {
            client,
            limits: SessionLimits {
                search_per_page: config.search.results_limit.clamp(1, 100),
                issues_per_page: config.issues.results_limit.clamp(1, 100),
            },
            profile: None,
            repositories: None,
            issue_results: SessionCache::new(ttl),
            parsed_prompts: SessionCache::new(ttl),
            summaries: SessionCache::new(ttl),
        }
    }

    /// GitHub client bound to this session's token.
    #[must_use]
    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// Result limits for searches.
    #[must_use]
    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    /// Last fetched profile.
    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Last fetched repository list.
    #[must_use]
    pub fn repositories(&self) -> Option<&[RepoSummary]> {
        self.repositories.as_deref()
    }

    pub(crate) fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    pub(crate) fn set_repositories(&mut self, repositories: Vec<RepoSummary>) {
        self.repositories = Some(repositories);
    }

    /// Forget fetched data and cached results; the token is kept.
    pub fn reset(&mut self) {
        self.profile = None;
        self.repositories = None;
        self.issue_results.clear();
        self.parsed_prompts.clear();
        self.summaries.clear();
    }

    /// Number of cached (issue results, parsed prompts, explanations).
    #[must_use]
    pub fn cache_sizes(&self) -> (usize, usize, usize) {
        (
            self.issue_results.len(),
            self.parsed_prompts.len(),
            self.summaries.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::open(SecretString::from("t".to_string()), &AppConfig::default()).expect("session")
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = session();
        assert!(session.profile().is_none());
        assert!(session.repositories().is_none());
        assert_eq!(session.cache_sizes(), (0, 0, 0));
        assert_eq!(session.limits().issues_per_page, 30);
    }

    #[test]
    fn test_open_with_huge_cache_ttl() {
        let mut config = AppConfig::default();
        config.cache.ttl_minutes = 1_000_000_000_000_000;

        let mut session =
            Session::open(SecretString::from("t".to_string()), &config).expect("session");
        session.summaries.insert("url", "text".to_string());
        assert_eq!(session.cache_sizes(), (0, 0, 1));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut session = session();
        session.set_repositories(Vec::new());
        session.summaries.insert("url", "text".to_string());
        session.parsed_prompts.insert("p", PromptFilters::default());

        session.reset();
        assert!(session.repositories().is_none());
        assert_eq!(session.cache_sizes(), (0, 0, 0));
    }
}
