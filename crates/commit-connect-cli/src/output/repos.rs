// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::ReposResult;

use super::Renderable;
use super::common::{NO_LANGUAGE, histogram_lines, md_cell, repo_table};

impl Renderable for ReposResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        if self.repositories.is_empty() {
            writeln!(w, "{}", style("No repositories found.").yellow())?;
            return Ok(());
        }

        let heading = if self.repositories.len() < self.total {
            format!(
                "Showing {} of {} repositories:",
                self.repositories.len(),
                self.total
            )
        } else {
            format!("{} repositories:", self.total)
        };
        writeln!(w, "{}", style(heading).bold())?;
        writeln!(w, "{}", repo_table(&self.repositories))?;

        writeln!(w)?;
        writeln!(w, "{}", style("Languages:").bold())?;
        if self.histogram.is_empty() {
            writeln!(w, "  {}", style("No language data.").dim())?;
        }
        for line in histogram_lines(&self.histogram) {
            writeln!(w, "  {line}")?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Repositories ({})\n", self.total)?;
        writeln!(w, "| Repository | Language | Stars | Description |")?;
        writeln!(w, "|---|---|---|---|")?;
        for repo in &self.repositories {
            writeln!(
                w,
                "| [{}]({}) | {} | {} | {} |",
                repo.full_name,
                repo.html_url,
                repo.primary_language().unwrap_or(NO_LANGUAGE),
                repo.stargazers_count,
                md_cell(repo.description.as_deref().unwrap_or(""))
            )?;
        }

        writeln!(w, "\n### Languages\n")?;
        for entry in self.histogram.entries() {
            writeln!(w, "- **{}**: {}", entry.language, entry.count)?;
        }
        Ok(())
    }
}
