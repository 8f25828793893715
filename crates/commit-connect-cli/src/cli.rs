// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for Commit-Connect.
//!
//! Uses clap's derive API. Option enums are mirrored here as `ValueEnum`s
//! and converted into the core's types, keeping clap out of the library.

use std::io::IsTerminal;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use commit_connect_core::{AssignmentFilter, IssueSort, IssueState, RepoSort, SortOrder};

/// Extended help text for the completion subcommand.
const COMPLETION_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc:
      eval "$(commit-connect completion bash)"

  zsh
    commit-connect completion zsh > ~/.zsh/completions/_commit-connect

  fish
    commit-connect completion fish > ~/.config/fish/completions/commit-connect.fish
"#;

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
    /// Markdown output
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json, yaml, markdown)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress)
    pub quiet: bool,
    /// Enable verbose output
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// Commit-Connect - find open source issues that fit you.
///
/// Shows your GitHub profile and language statistics, searches public
/// repositories, and turns a plain-language description into issue
/// recommendations with AI assistance.
#[derive(Parser)]
#[command(name = "commit-connect")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, progress)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Override configured AI provider (gemini, openrouter, groq)
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Override configured AI model
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// GitHub personal access token (defaults to GH_TOKEN, GITHUB_TOKEN, then `gh auth token`)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect GitHub authentication
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Show your GitHub profile
    Profile,

    /// List your repositories and their language breakdown
    Repos {
        /// Show at most this many repositories
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Search public repositories by language, stars and recency
    Search(SearchArgs),

    /// Show the filters the AI extracts from a prompt
    Interpret {
        /// What you would like to work on, in plain language
        prompt: String,
    },

    /// Recommend issues for a plain-language prompt
    Issues(IssuesArgs),

    /// Interactive dashboard
    Dashboard,

    /// Generate shell completion script (output to stdout)
    #[command(after_long_help = COMPLETION_HELP)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Authentication subcommands
#[derive(Subcommand)]
pub enum AuthCommand {
    /// Show which token would be used and who it belongs to
    Status,
}

/// Arguments for repository search.
#[derive(Args, Clone)]
pub struct SearchArgs {
    /// Language to search (repeatable)
    #[arg(long = "language", short = 'l')]
    pub languages: Vec<String>,

    /// Search your N most used languages
    #[arg(long, conflicts_with = "languages")]
    pub top: Option<usize>,

    /// Minimum stars (default from config)
    #[arg(long)]
    pub min_stars: Option<u32>,

    /// Only repositories pushed within this many days (default from config)
    #[arg(long)]
    pub days: Option<u32>,

    /// Sort field
    #[arg(long, value_enum)]
    pub sort: Option<RepoSortArg>,

    /// Sort order
    #[arg(long, value_enum, default_value = "desc")]
    pub order: OrderArg,
}

/// Arguments for issue recommendations.
#[derive(Args, Clone)]
pub struct IssuesArgs {
    /// What you would like to work on, in plain language
    pub prompt: String,

    /// Issue state
    #[arg(long, value_enum, default_value = "open")]
    pub state: StateArg,

    /// Assignment filter
    #[arg(long, value_enum, default_value = "all")]
    pub assignment: AssignmentArg,

    /// Only issues updated within this many days; 0 disables (default from config)
    #[arg(long)]
    pub days: Option<u32>,

    /// Sort field
    #[arg(long, value_enum)]
    pub sort: Option<IssueSortArg>,

    /// Sort order
    #[arg(long, value_enum, default_value = "desc")]
    pub order: OrderArg,

    /// Explain the Nth result (1-based) with AI
    #[arg(long, value_name = "N")]
    pub explain: Option<usize>,
}

/// Repository sort field.
#[derive(Clone, Copy, ValueEnum)]
pub enum RepoSortArg {
    /// Stargazer count
    Stars,
    /// Fork count
    Forks,
    /// Last update
    Updated,
    /// Open help-wanted issues
    HelpWantedIssues,
}

impl From<RepoSortArg> for RepoSort {
    fn from(arg: RepoSortArg) -> Self {
        match arg {
            RepoSortArg::Stars => RepoSort::Stars,
            RepoSortArg::Forks => RepoSort::Forks,
            RepoSortArg::Updated => RepoSort::Updated,
            RepoSortArg::HelpWantedIssues => RepoSort::HelpWantedIssues,
        }
    }
}

/// Issue sort field.
#[derive(Clone, Copy, ValueEnum)]
pub enum IssueSortArg {
    /// Comment count
    Comments,
    /// Reactions
    Reactions,
    /// Reactions plus comments
    Interactions,
    /// Creation time
    Created,
    /// Last update
    Updated,
}

impl From<IssueSortArg> for IssueSort {
    fn from(arg: IssueSortArg) -> Self {
        match arg {
            IssueSortArg::Comments => IssueSort::Comments,
            IssueSortArg::Reactions => IssueSort::Reactions,
            IssueSortArg::Interactions => IssueSort::Interactions,
            IssueSortArg::Created => IssueSort::Created,
            IssueSortArg::Updated => IssueSort::Updated,
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, ValueEnum)]
pub enum OrderArg {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

/// Issue state.
#[derive(Clone, Copy, ValueEnum)]
pub enum StateArg {
    /// Open issues
    Open,
    /// Closed issues
    Closed,
}

impl From<StateArg> for IssueState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Open => IssueState::Open,
            StateArg::Closed => IssueState::Closed,
        }
    }
}

/// Assignment filter.
#[derive(Clone, Copy, ValueEnum)]
pub enum AssignmentArg {
    /// Any assignment
    All,
    /// Only assigned issues
    Assigned,
    /// Only unassigned issues
    Unassigned,
}

impl From<AssignmentArg> for AssignmentFilter {
    fn from(arg: AssignmentArg) -> Self {
        match arg {
            AssignmentArg::All => AssignmentFilter::All,
            AssignmentArg::Assigned => AssignmentFilter::Assigned,
            AssignmentArg::Unassigned => AssignmentFilter::Unassigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_issues_defaults() {
        let cli = Cli::try_parse_from(["commit-connect", "issues", "python testing"])
            .expect("should parse");
        match cli.command {
            Commands::Issues(args) => {
                assert_eq!(args.prompt, "python testing");
                assert!(matches!(args.state, StateArg::Open));
                assert!(matches!(args.assignment, AssignmentArg::All));
                assert!(args.sort.is_none());
                assert!(args.explain.is_none());
            }
            _ => panic!("expected issues command"),
        }
    }

    #[test]
    fn test_search_top_conflicts_with_language() {
        let result = Cli::try_parse_from([
            "commit-connect",
            "search",
            "--top",
            "3",
            "--language",
            "Rust",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_token_after_subcommand() {
        let cli = Cli::try_parse_from(["commit-connect", "profile", "--token", "abc"])
            .expect("should parse");
        assert_eq!(cli.token.as_deref(), Some("abc"));
    }
}
