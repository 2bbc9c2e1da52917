//! CLI-specific error types

use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read or parsed
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Config file already exists at the init path
    #[error("Already initialized: {0}")]
    AlreadyInitialized(String),

    /// Server failed to boot or bind
    #[error("Boot failed: {0}")]
    BootFailed(String),

    /// stdin/stdout failure
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
