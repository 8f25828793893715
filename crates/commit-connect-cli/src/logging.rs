// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the Commit-Connect CLI.
//!
//! Uses `tracing` with `tracing-subscriber`, writing to stderr so structured
//! output on stdout stays clean. Log level is controlled via `RUST_LOG`.
//!
//! # Examples
//!
//! ```bash
//! # Debug output for troubleshooting
//! RUST_LOG=commit_connect_core=debug commit-connect issues "rust async"
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str =
    "commit_connect=warn,commit_connect_core=warn,commit_connect_cli=warn,reqwest=error";

/// Initialize the logging subsystem.
///
/// With `verbose`, the crate's own targets are raised to `info` unless
/// `RUST_LOG` is set.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        "commit_connect=info,commit_connect_core=info,commit_connect_cli=info,reqwest=warn"
    } else {
        DEFAULT_FILTER
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
