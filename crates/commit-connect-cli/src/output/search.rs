// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::SearchResult;

use super::Renderable;
use super::common::{NO_LANGUAGE, join_or, md_cell, repo_table};

impl SearchResult {
    fn failure_line(failure: &commit_connect_core::LanguageFailure) -> String {
        match failure.status {
            Some(status) => format!("{} (HTTP {status}): {}", failure.language, failure.message),
            None => format!("{}: {}", failure.language, failure.message),
        }
    }
}

impl Renderable for SearchResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        writeln!(
            w,
            "{} {} {}",
            style("Searched").dim(),
            style(join_or(&self.languages, "-")).yellow(),
            style(format!(
                "(stars >= {}, pushed in the last {} days)",
                self.min_stars, self.recency_days
            ))
            .dim()
        )?;

        let repos = &self.outcome.repositories;
        if repos.is_empty() {
            writeln!(w, "{}", style("No repositories matched.").yellow())?;
        } else {
            writeln!(
                w,
                "{}",
                style(format!("Found {} repositories:", repos.len())).bold()
            )?;
            writeln!(w, "{}", repo_table(repos))?;
        }

        for failure in &self.outcome.failures {
            writeln!(
                w,
                "{} {}",
                style("!").yellow().bold(),
                style(Self::failure_line(failure)).yellow()
            )?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "## Repository search: {}\n",
            join_or(&self.languages, "-")
        )?;
        writeln!(
            w,
            "Stars >= {}, pushed in the last {} days.\n",
            self.min_stars, self.recency_days
        )?;
        if self.outcome.repositories.is_empty() {
            writeln!(w, "No repositories matched.")?;
        } else {
            writeln!(w, "| Repository | Language | Stars | Description |")?;
            writeln!(w, "|---|---|---|---|")?;
            for repo in &self.outcome.repositories {
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
        }

        if !self.outcome.failures.is_empty() {
            writeln!(w, "\n### Failed languages\n")?;
            for failure in &self.outcome.failures {
                writeln!(w, "- {}", Self::failure_line(failure))?;
            }
        }
        Ok(())
    }
}
