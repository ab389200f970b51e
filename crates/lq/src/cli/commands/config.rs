//! Implementation of `lq config`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings and the files they came from.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    if config.files.is_empty() {
        println!("# no configuration files found, showing defaults");
    } else {
        for path in &config.files {
            println!("# {}", path.display());
        }
    }
    print!("{}", config.settings_to_toml());
    ExitCode::SUCCESS
}
