// SPDX-License-Identifier: Apache-2.0

//! Authenticated user profile (`GET /user`).

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::GitHubClient;
use crate::error::{ConnectError, Result};

/// Profile of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Login handle.
    pub login: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Free-text biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,
    /// Profile page URL.
    #[serde(default)]
    pub html_url: String,
    /// Location.
    #[serde(default)]
    pub location: Option<String>,
    /// Company.
    #[serde(default)]
    pub company: Option<String>,
    /// Number of public repositories.
    #[serde(default)]
    pub public_repos: u32,
    /// Follower count.
    #[serde(default)]
    pub followers: u32,
    /// Following count.
    #[serde(default)]
    pub following: u32,
}

impl UserProfile {
    /// Name to greet the user with, falling back to the login.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// Turn a GitHub status error into an authentication failure.
pub(crate) fn as_auth_failure(err: ConnectError) -> ConnectError {
    match err {
        ConnectError::GitHub { status, message } => {
            ConnectError::AuthenticationFailed { status, message }
        }
        other => other,
    }
}

/// Fetch the profile of the token's owner.
#[instrument(skip(client))]
pub async fn fetch_profile(client: &GitHubClient) -> Result<UserProfile> {
    let url = format!("{}/user", client.base_url());
    let profile: UserProfile = client.get_json(&url).await.map_err(as_auth_failure)?;
    debug!(login = %profile.login, "Fetched user profile");
    Ok(profile)
}
