//! CLI support for the `lq` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod logging;

pub use context::CommandContext;
