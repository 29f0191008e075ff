// src/errors.rs

//! Crate-wide error types.
//!
//! - [`ExecError`] covers setup-time failures (configuration, registration).
//! - [`RunFailure`] is the value a single invocation reports back to the
//!   scheduler. It never escapes the scheduling loop.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("input is not registered; call register() before run()")]
    NotRegistered,
}

/// Which subprocess stream a [`RunFailure::Stream`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

/// Why one invocation of the command failed.
#[derive(Error, Debug)]
pub enum RunFailure {
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command not found while running `{command}`")]
    CommandNotFound { command: String },

    #[error("command is not executable while running `{command}`")]
    NotExecutable { command: String },

    #[error("error reading {stream} of `{command}`: {source}")]
    Stream {
        command: String,
        stream: StreamKind,
        #[source]
        source: std::io::Error,
    },

    #[error("error waiting for `{command}` to exit: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExecError>;
