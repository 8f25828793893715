// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Commit-Connect Core
//!
//! Core library for Commit-Connect, a GitHub dashboard that turns a
//! free-text description of what you want to work on into issue
//! recommendations.
//!
//! This crate provides reusable components for:
//! - GitHub REST access with a session token (profile, repositories, search)
//! - Language statistics over the user's repositories
//! - LLM prompt interpretation and issue explanations
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use commit_connect_core::{AiClient, IssueSearchParams, Session, facade, load_config};
//! use secrecy::SecretString;
//!
//! # async fn example() -> commit_connect_core::Result<()> {
//! let config = load_config()?;
//! let mut session = Session::open(SecretString::from("ghp_example".to_string()), &config)?;
//! let ai = AiClient::new(&config.ai)?;
//!
//! let recs = facade::recommend_issues(
//!     &mut session,
//!     &ai,
//!     "beginner-friendly Python issues about testing",
//!     &IssueSearchParams::default(),
//! )
//! .await?;
//! for issue in &recs.results.issues {
//!     println!("{} {}", issue.title, issue.html_url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ai`] - Completion providers, prompt interpretation, explanations
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`facade`] - One function per user action
//! - [`github`] - GitHub REST client and endpoint families
//! - [`session`] - Token holder and per-session caches

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{ConnectError, Result};

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AiConfig, AppConfig, CacheConfig, GitHubConfig, IssuesConfig, SearchConfig, config_dir,
    config_file_path, load_config, load_config_from,
};

// ============================================================================
// Session
// ============================================================================

pub use session::{Session, SessionLimits};

// ============================================================================
// GitHub
// ============================================================================

pub use github::auth::{TokenSource, resolve_token};
pub use github::issues::{
    AssignmentFilter, IssueLabel, IssueRecord, IssueSearchParams, IssueSort, IssueState, IssueUser,
    build_issue_query, build_issue_search_url,
};
pub use github::profile::UserProfile;
pub use github::repos::{LanguageCount, LanguageHistogram, RepoSummary};
pub use github::search::{
    LanguageFailure, RepoSearchFilter, RepoSearchOutcome, RepoSort, build_repo_search_query,
};
pub use github::{GitHubClient, SortOrder};

// ============================================================================
// AI
// ============================================================================

pub use ai::registry::{ProviderConfig, all_providers, get_provider};
pub use ai::{AiClient, CompletionProvider, Difficulty, PromptFilters};

// ============================================================================
// Facade
// ============================================================================

pub use facade::{IssueRecommendations, IssueResults, RepoOverview};

pub mod ai;
pub mod cache;
pub mod config;
pub mod error;
pub mod facade;
pub mod github;
pub mod session;
pub mod utils;
