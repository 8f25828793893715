// SPDX-License-Identifier: Apache-2.0

//! Display helpers shared by the renderers.

use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use commit_connect_core::utils::{format_relative_time, truncate};
use commit_connect_core::{LanguageHistogram, RepoSummary};
use console::style;

/// Width of the longest histogram bar.
const BAR_WIDTH: usize = 30;

/// Longest description shown in a repository table.
const DESCRIPTION_WIDTH: usize = 60;

/// Placeholder for a missing repository language.
pub const NO_LANGUAGE: &str = "-";

/// Join items with ", ", or return `fallback` when there are none.
pub fn join_or<S: AsRef<str>>(items: &[S], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Relative time, or "unknown" for a missing timestamp.
pub fn relative_or_unknown(dt: Option<&DateTime<Utc>>) -> String {
    dt.map_or_else(|| "unknown".to_string(), format_relative_time)
}

/// A bar of `#` proportional to `count / max`, at least one wide for non-zero counts.
pub fn bar(count: usize, max: usize) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(max).clamp(1, BAR_WIDTH);
    "#".repeat(width)
}

/// Histogram as aligned text lines: language, bar, count.
pub fn histogram_lines(histogram: &LanguageHistogram) -> Vec<String> {
    let entries = histogram.entries();
    let max = entries.iter().map(|e| e.count).max().unwrap_or(0);
    let name_width = entries
        .iter()
        .map(|e| e.language.chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|e| {
            format!(
                "{:<name_width$}  {} {}",
                e.language,
                style(bar(e.count, max)).green(),
                style(e.count).dim()
            )
        })
        .collect()
}

/// Repository table with name, language, stars, forks and description.
pub fn repo_table(repos: &[RepoSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("REPOSITORY").fg(Color::White),
            Cell::new("LANGUAGE").fg(Color::White),
            Cell::new("STARS").fg(Color::White),
            Cell::new("FORKS").fg(Color::White),
            Cell::new("UPDATED").fg(Color::White),
            Cell::new("DESCRIPTION").fg(Color::White),
        ]);

    for repo in repos {
        let description = repo.description.as_deref().unwrap_or("");
        table.add_row(vec![
            Cell::new(&repo.full_name).fg(Color::Cyan),
            Cell::new(repo.primary_language().unwrap_or(NO_LANGUAGE)).fg(Color::Yellow),
            Cell::new(repo.stargazers_count),
            Cell::new(repo.forks_count),
            Cell::new(relative_or_unknown(repo.updated_at.as_ref())).fg(Color::DarkGrey),
            Cell::new(truncate(description, DESCRIPTION_WIDTH)),
        ]);
    }

    table
}

/// Escape `|` so text can sit inside a markdown table cell.
pub fn md_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}
