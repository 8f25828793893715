// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use commit_connect_core::{Session, facade};
use tracing::warn;

use crate::commands::types::ProfileResult;

const TOP_LANGUAGES: usize = 3;

/// Fetch the profile plus the user's top languages.
///
/// A failing repository fetch only drops the language list.
pub async fn run(session: &mut Session) -> Result<ProfileResult> {
    let profile = facade::load_profile(session).await?;

    let top_languages = match facade::language_histogram(session).await {
        Ok(histogram) => histogram
            .top(TOP_LANGUAGES)
            .into_iter()
            .map(str::to_string)
            .collect(),
        Err(e) => {
            warn!(error = %e, "Could not load repositories for language summary");
            Vec::new()
        }
    };

    Ok(ProfileResult {
        profile,
        top_languages,
    })
}
