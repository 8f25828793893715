// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::AuthStatusResult;

use super::Renderable;

impl Renderable for AuthStatusResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        match (&self.method, &self.username) {
            (Some(method), Some(username)) => {
                writeln!(w, "{} Authenticated with GitHub", style("*").green().bold())?;
                writeln!(w, "  Method: {}", style(method.to_string()).cyan())?;
                writeln!(w, "  Username: {}", style(username).cyan())?;
            }
            (Some(method), None) => {
                writeln!(
                    w,
                    "{} Token found via {} but GitHub did not accept it.",
                    style("!").yellow().bold(),
                    style(method.to_string()).cyan()
                )?;
            }
            _ => {
                writeln!(
                    w,
                    "{} Not authenticated. Pass {}, set {}, or run {}.",
                    style("!").yellow().bold(),
                    style("--token").cyan(),
                    style("GITHUB_TOKEN").cyan(),
                    style("gh auth login").cyan()
                )?;
            }
        }
        writeln!(w)?;
        Ok(())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Authentication Status\n")?;
        if self.authenticated {
            writeln!(w, "**Status:** Authenticated")?;
        } else {
            writeln!(w, "**Status:** Not authenticated")?;
        }
        if let Some(ref method) = self.method {
            writeln!(w, "**Method:** {method}")?;
        }
        if let Some(ref username) = self.username {
            writeln!(w, "**Username:** {username}")?;
        }
        Ok(())
    }
}
