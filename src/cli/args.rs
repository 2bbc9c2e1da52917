//! CLI argument definitions using clap
//!
//! Commands:
//! - airways init --config <path>
//! - airways serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Airways - airport service API server
#[derive(Parser, Debug)]
#[command(name = "airways")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./airways.json")]
        config: PathBuf,
    },

    /// Start the API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./airways.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_with_port_override() {
        let cli = Cli::parse_from(["airways", "serve", "--config", "cfg.json", "--port", "9000"]);
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("cfg.json"));
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_init_default_config_path() {
        let cli = Cli::parse_from(["airways", "init"]);
        match cli.command {
            Command::Init { config } => {
                assert_eq!(config, PathBuf::from("./airways.json"));
            }
            _ => panic!("expected init command"),
        }
    }
}
