//! CLI module
//!
//! - init: write a default configuration file
//! - serve: boot the API server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, Config};
pub use errors::{CliError, CliResult};
