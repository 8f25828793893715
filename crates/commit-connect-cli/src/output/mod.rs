// SPDX-License-Identifier: Apache-2.0

//! Presentation of command results.
//!
//! Every result type can be printed four ways, chosen with `--output`:
//! `text` (colored terminal output), `markdown` (for pasting into an issue
//! or a README), and `json` or `yaml` straight from the serde derive.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};

use crate::cli::{OutputContext, OutputFormat};

/// A command result with terminal and markdown renderings.
///
/// Structured formats need only the `Serialize` supertrait.
pub trait Renderable: Serialize {
    /// Write the colored terminal view.
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()>;

    /// Write the markdown view. Falls back to the terminal view.
    fn render_markdown(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        self.render_text(w, ctx)
    }
}

/// Print `result` to stdout in the format selected on the command line.
pub fn render<T: Renderable>(result: &T, ctx: &OutputContext) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result).context("Could not encode JSON")?;
            writeln!(stdout, "{json}")?;
        }
        OutputFormat::Yaml => {
            let yaml = serde_saphyr::to_string(result).context("Could not encode YAML")?;
            write!(stdout, "{yaml}")?;
        }
        OutputFormat::Markdown => {
            result
                .render_markdown(&mut stdout, ctx)
                .context("Could not write markdown output")?;
        }
        OutputFormat::Text => {
            result
                .render_text(&mut stdout, ctx)
                .context("Could not write text output")?;
        }
    }
    stdout.flush()?;
    Ok(())
}

mod auth;
pub mod common;
mod filters;
mod issues;
mod profile;
mod repos;
mod search;
