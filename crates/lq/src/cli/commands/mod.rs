//! Command implementations and dispatch.

pub mod config;
pub mod escape;
pub mod init;
pub mod render;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Escape(cmd) => escape::run(&cmd),
        Commands::Render(cmd) => render::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
