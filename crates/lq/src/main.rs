//! Command-line interface for the `lq` Lucene query builder.

#![warn(missing_docs)]

mod cli;
mod document;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{CommandContext, args::Cli, commands, logging};

/// Parses arguments, sets up logging and dispatches the subcommand.
fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = if cli.command.needs_config() {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
