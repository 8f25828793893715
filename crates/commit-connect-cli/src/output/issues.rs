// SPDX-License-Identifier: Apache-2.0

use commit_connect_core::IssueRecord;
use commit_connect_core::utils::truncate;
use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::{ExplainedIssue, IssuesResult};

use super::Renderable;
use super::common::{join_or, relative_or_unknown};
use super::filters::filter_rows;

const TITLE_WIDTH: usize = 80;

fn write_issue_text(w: &mut dyn Write, position: usize, issue: &IssueRecord) -> io::Result<()> {
    let repo = issue
        .repository_full_name()
        .unwrap_or_else(|| "unknown repository".to_string());

    writeln!(
        w,
        "{} {} {}",
        style(format!("{position:>3}.")).dim(),
        style(format!("#{}", issue.number)).green(),
        style(truncate(&issue.title, TITLE_WIDTH)).bold()
    )?;
    writeln!(w, "     {}", style(&issue.html_url).cyan())?;
    writeln!(
        w,
        "     {} {}  {} {}  {} {}",
        style("repo:").dim(),
        repo,
        style("by:").dim(),
        issue.author().unwrap_or("unknown"),
        style("state:").dim(),
        issue.state
    )?;
    writeln!(
        w,
        "     {} {}",
        style("labels:").dim(),
        style(join_or(&issue.label_names(), "none")).yellow()
    )?;
    writeln!(
        w,
        "     {} {}  {} {}  {} {}",
        style("assignees:").dim(),
        join_or(&issue.assignee_logins(), "Unassigned"),
        style("comments:").dim(),
        issue.comments,
        style("updated:").dim(),
        relative_or_unknown(issue.updated_at.as_ref())
    )?;
    Ok(())
}

fn write_issue_markdown(w: &mut dyn Write, issue: &IssueRecord) -> io::Result<()> {
    let labels: Vec<String> = issue
        .label_names()
        .iter()
        .map(|l| format!("`{l}`"))
        .collect();
    writeln!(
        w,
        "- **[#{} {}]({})** in {} by {}",
        issue.number,
        issue.title,
        issue.html_url,
        issue.repository_full_name().unwrap_or_default(),
        issue.author().unwrap_or("unknown")
    )?;
    writeln!(
        w,
        "  - Labels: {} | Assignees: {} | Comments: {} | Updated: {}",
        if labels.is_empty() {
            "none".to_string()
        } else {
            labels.join(" ")
        },
        join_or(&issue.assignee_logins(), "Unassigned"),
        issue.comments,
        relative_or_unknown(issue.updated_at.as_ref())
    )?;
    Ok(())
}

impl Renderable for ExplainedIssue {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        write_issue_text(w, self.position, &self.issue)?;
        writeln!(w)?;
        for line in self.explanation.lines() {
            writeln!(w, "  {line}")?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "## #{} {}\n\n<{}>\n",
            self.issue.number, self.issue.title, self.issue.html_url
        )?;
        writeln!(w, "{}", self.explanation.trim())?;
        Ok(())
    }
}

impl Renderable for IssuesResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let filters = &self.recommendations.filters;
        let results = &self.recommendations.results;

        writeln!(w)?;
        writeln!(w, "{}", style("Filters:").bold())?;
        for (label, value) in filter_rows(filters) {
            writeln!(
                w,
                "  {:<12}{}",
                style(format!("{label}:")).dim(),
                style(value).cyan()
            )?;
        }
        if ctx.verbose {
            writeln!(w, "  {:<12}{}", style("Query:").dim(), results.query)?;
            writeln!(w, "  {:<12}{}", style("URL:").dim(), results.url)?;
            if results.cached {
                writeln!(w, "  {}", style("(from session cache)").dim())?;
            }
        }
        writeln!(w)?;

        if results.issues.is_empty() {
            writeln!(w, "{}", style("No matching issues found.").yellow())?;
        } else {
            writeln!(
                w,
                "{}",
                style(format!("Found {} issues:", results.issues.len())).bold()
            )?;
            writeln!(w)?;
            for (i, issue) in results.issues.iter().enumerate() {
                write_issue_text(w, i + 1, issue)?;
                writeln!(w)?;
            }
        }
        if results.excluded > 0 {
            writeln!(
                w,
                "{}",
                style(format!("{} issue(s) hidden by exclude terms.", results.excluded)).dim()
            )?;
        }

        if let Some(ref explained) = self.explained {
            writeln!(w, "{}", style("Explanation").bold().underlined())?;
            explained.render_text(w, ctx)?;
        }
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let results = &self.recommendations.results;

        writeln!(w, "## Filters\n")?;
        for (label, value) in filter_rows(&self.recommendations.filters) {
            writeln!(w, "- **{label}:** {value}")?;
        }
        writeln!(w, "\nQuery: `{}`\n", results.query)?;

        writeln!(w, "## Issues ({})\n", results.issues.len())?;
        if results.issues.is_empty() {
            writeln!(w, "No matching issues found.")?;
        }
        for issue in &results.issues {
            write_issue_markdown(w, issue)?;
        }
        if results.excluded > 0 {
            writeln!(
                w,
                "\n_{} issue(s) hidden by exclude terms._",
                results.excluded
            )?;
        }

        if let Some(ref explained) = self.explained {
            writeln!(w)?;
            explained.render_markdown(w, ctx)?;
        }
        Ok(())
    }
}
