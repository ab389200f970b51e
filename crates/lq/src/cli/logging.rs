//! Diagnostic logging setup.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default log level.
fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs a stderr subscriber. `RUST_LOG` directives are honoured on top of the
/// verbosity level.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy();

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init()
    {
        eprintln!("warning: could not initialize logging: {e}");
    }
}
