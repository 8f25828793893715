// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use commit_connect_core::{AppConfig, RepoSearchFilter, Session, facade};
use tracing::debug;

use crate::cli::SearchArgs;
use crate::commands::types::SearchResult;

/// Languages to search: explicit flags, or the user's top N.
async fn resolve_languages(session: &mut Session, args: &SearchArgs) -> Result<Vec<String>> {
    match args.top {
        Some(n) => {
            let histogram = facade::language_histogram(session).await?;
            let languages: Vec<String> = histogram.top(n).into_iter().map(str::to_string).collect();
            debug!(?languages, "Using top languages");
            Ok(languages)
        }
        None => Ok(args.languages.clone()),
    }
}

/// Search public repositories, one request per language.
pub async fn run(
    session: &mut Session,
    args: &SearchArgs,
    config: &AppConfig,
) -> Result<SearchResult> {
    let languages = resolve_languages(session, args).await?;
    let filter = RepoSearchFilter::builder()
        .languages(languages)
        .min_stars(args.min_stars.unwrap_or(config.search.min_stars))
        .recency_days(args.days.unwrap_or(config.search.recency_days))
        .maybe_sort(args.sort.map(Into::into))
        .order(args.order.into())
        .build();

    let outcome = facade::search_repositories(session, &filter).await?;

    Ok(SearchResult {
        languages: filter.languages,
        min_stars: filter.min_stars,
        recency_days: filter.recency_days,
        outcome,
    })
}
