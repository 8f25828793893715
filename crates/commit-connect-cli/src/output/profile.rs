// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::ProfileResult;

use super::Renderable;
use super::common::join_or;

impl Renderable for ProfileResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let p = &self.profile;
        writeln!(w)?;
        writeln!(
            w,
            "{} {}",
            style(p.display_name()).bold(),
            style(format!("(@{})", p.login)).dim()
        )?;
        if let Some(bio) = p.bio.as_deref().filter(|b| !b.trim().is_empty()) {
            writeln!(w, "  {}", bio.trim())?;
        }
        writeln!(w)?;
        writeln!(
            w,
            "  {:<14}{}",
            style("Profile:").dim(),
            style(&p.html_url).cyan()
        )?;
        if let Some(ref location) = p.location {
            writeln!(w, "  {:<14}{location}", style("Location:").dim())?;
        }
        if let Some(ref company) = p.company {
            writeln!(w, "  {:<14}{company}", style("Company:").dim())?;
        }
        writeln!(
            w,
            "  {:<14}{}",
            style("Repositories:").dim(),
            p.public_repos
        )?;
        writeln!(
            w,
            "  {:<14}{} followers, {} following",
            style("Network:").dim(),
            p.followers,
            p.following
        )?;
        writeln!(
            w,
            "  {:<14}{}",
            style("Languages:").dim(),
            style(join_or(&self.top_languages, "unknown")).yellow()
        )?;
        if ctx.verbose {
            writeln!(w, "  {:<14}{}", style("Avatar:").dim(), p.avatar_url)?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        let p = &self.profile;
        writeln!(w, "## {} (@{})\n", p.display_name(), p.login)?;
        writeln!(w, "![avatar]({})\n", p.avatar_url)?;
        if let Some(bio) = p.bio.as_deref().filter(|b| !b.trim().is_empty()) {
            writeln!(w, "> {}\n", bio.trim())?;
        }
        writeln!(w, "- **Profile:** {}", p.html_url)?;
        if let Some(ref location) = p.location {
            writeln!(w, "- **Location:** {location}")?;
        }
        if let Some(ref company) = p.company {
            writeln!(w, "- **Company:** {company}")?;
        }
        writeln!(w, "- **Public repositories:** {}", p.public_repos)?;
        writeln!(w, "- **Followers:** {}", p.followers)?;
        writeln!(w, "- **Following:** {}", p.following)?;
        writeln!(
            w,
            "- **Top languages:** {}",
            join_or(&self.top_languages, "unknown")
        )?;
        Ok(())
    }
}
