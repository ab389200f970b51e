//! Clap argument definitions for the `lq` CLI.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "lq")]
#[command(about = "Build and render Lucene query strings")]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `lq escape`.
#[derive(Args, Debug, Clone)]
pub struct EscapeCommand {
    /// Tokens to escape, one output line each
    #[arg(required = true)]
    pub tokens: Vec<String>,

    /// Always wrap the result in double quotes
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `lq render`.
#[derive(Args, Debug, Clone)]
pub struct RenderCommand {
    /// Query document to render, or '-' for stdin
    pub file: String,

    /// Print the query tree instead of the rendered string
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for `lq init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.lq.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `lq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Escape tokens for safe inclusion in a query
    Escape(EscapeCommand),

    /// Render a TOML query document to a query string
    #[command(after_help = "\
DOCUMENT FORMAT:
  operator = \"AND\"            Operator joining top-level clauses

  [[clause]]
  kind = \"term\"               term, terms, range, date_range or group
  field = \"title\"             Field scope (optional)
  value = \"hello world\"       Term value
  fuzziness = 1               Edit distance or proximity (term only)
  boost = 2.0                 Relevance multiplier
  exclusion = \"require\"       none, require (+) or prohibit (-)

  values = [\"a\", \"b\"]         Terms (terms only)
  start = 1, stop = 10        Bounds (range, date_range); omit for '*'
  inclusive = false           Use {} instead of [] (range, date_range)
  clause = [ ... ]            Nested clauses (group only)

EXAMPLES:
  lq render query.toml
  lq render --explain query.toml
  cat query.toml | lq render -")]
    Render(RenderCommand),

    /// Show effective configuration settings
    Config,

    /// Initialize lq configuration in current directory
    Init(InitCommand),
}

impl Commands {
    /// Returns true if the command reads the merged configuration.
    ///
    /// `init` and `escape` must work even when an existing config file is invalid.
    pub fn needs_config(&self) -> bool {
        matches!(self, Self::Render(_) | Self::Config)
    }
}
