// SPDX-License-Identifier: Apache-2.0

use commit_connect_core::PromptFilters;
use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::FiltersResult;

use super::Renderable;
use super::common::join_or;

/// Label/value pairs shared by the text and markdown renderers.
pub(super) fn filter_rows(filters: &PromptFilters) -> Vec<(&'static str, String)> {
    vec![
        ("Languages", join_or(&filters.languages, "-")),
        ("Frameworks", join_or(&filters.frameworks, "-")),
        ("Tools", join_or(&filters.tools, "-")),
        (
            "Difficulty",
            filters
                .difficulty
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
        ),
        ("Other", join_or(&filters.other_filters, "-")),
        ("Exclude", join_or(&filters.exclude, "-")),
    ]
}

impl Renderable for FiltersResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        writeln!(
            w,
            "{} {}",
            style("Prompt:").dim(),
            style(&self.prompt).bold()
        )?;
        if self.filters.is_empty() {
            writeln!(w, "{}", style("No filters recognised.").yellow())?;
        }
        for (label, value) in filter_rows(&self.filters) {
            writeln!(
                w,
                "  {:<12}{}",
                style(format!("{label}:")).dim(),
                style(value).cyan()
            )?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Filters\n")?;
        writeln!(w, "> {}\n", self.prompt)?;
        for (label, value) in filter_rows(&self.filters) {
            writeln!(w, "- **{label}:** {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commit_connect_core::Difficulty;

    #[test]
    fn test_filter_rows_fill_placeholders() {
        let filters = PromptFilters {
            languages: vec!["Python".to_string(), "Rust".to_string()],
            difficulty: Some(Difficulty::Beginner),
            ..PromptFilters::default()
        };
        let rows = filter_rows(&filters);
        assert_eq!(rows[0], ("Languages", "Python, Rust".to_string()));
        assert_eq!(rows[1], ("Frameworks", "-".to_string()));
        assert_eq!(rows[3].1, Difficulty::Beginner.to_string());
    }
}
