//! Error types for swapcon-env

use std::path::PathBuf;

/// Result type for swapcon-env operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a config source
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An env file couldn't be parsed
    #[error("Invalid env file {path}: {source}")]
    InvalidEnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// Invalid settings in swapcon.toml
    #[error("Invalid settings at {path}: {message}")]
    InvalidSettings { path: PathBuf, message: String },

    /// Error from swapcon-core (unknown category, empty group, ...)
    #[error(transparent)]
    Core(#[from] swapcon_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Regex compilation error
    #[error(transparent)]
    Regex(#[from] regex::Error),
}
