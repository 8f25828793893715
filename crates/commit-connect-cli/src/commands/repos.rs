// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use commit_connect_core::{Session, facade};

use crate::commands::types::ReposResult;

/// Fetch the user's repositories; the histogram always covers all of them.
pub async fn run(session: &mut Session, limit: Option<usize>) -> Result<ReposResult> {
    let overview = facade::load_repositories(session).await?;
    let total = overview.repositories.len();

    let mut repositories = overview.repositories;
    if let Some(limit) = limit {
        repositories.truncate(limit);
    }

    Ok(ReposResult {
        repositories,
        total,
        histogram: overview.histogram,
    })
}
