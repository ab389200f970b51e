//! Implementation of `lq escape`.

use std::process::ExitCode;

use lq_query::escape;

use crate::cli::args::EscapeCommand;

/// Prints each token escaped, one per line.
pub fn run(cmd: &EscapeCommand) -> ExitCode {
    for token in &cmd.tokens {
        println!("{}", escape(token, cmd.force));
    }
    ExitCode::SUCCESS
}
