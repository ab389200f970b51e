//! Implementation of `lq init`.

use std::{fs, path::PathBuf, process::ExitCode};

use lq_config::{CONFIG_FILENAME, Template, global_config_path};
use tracing::info;

use crate::cli::{args::InitCommand, context::CommandContext};

/// Writes a commented `.lq.toml` spelling out the default settings.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let (path, template) = match target(ctx, cmd.global) {
        Some(target) => target,
        None => {
            eprintln!("error: could not determine home directory");
            return ExitCode::FAILURE;
        }
    };

    if path.exists() && !cmd.force {
        eprintln!("error: configuration file already exists: {}", path.display());
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    if let Err(e) = fs::write(&path, template.contents()) {
        eprintln!("error: failed to write {}: {e}", path.display());
        return ExitCode::FAILURE;
    }

    info!(?template, "wrote configuration template");
    println!("Created {}", path.display());
    ExitCode::SUCCESS
}

/// Picks the file to write. Running in the home directory implies `--global`.
fn target(ctx: &CommandContext, global: bool) -> Option<(PathBuf, Template)> {
    let global_path = global_config_path();
    let in_home = global_path
        .as_deref()
        .and_then(|p| p.parent())
        .is_some_and(|home| home == ctx.cwd);

    if global || in_home {
        global_path.map(|p| (p, Template::Global))
    } else {
        Some((ctx.cwd.join(CONFIG_FILENAME), Template::Local))
    }
}
