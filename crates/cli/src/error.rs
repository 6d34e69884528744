// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types and exit codes.
//!
//! `Load`, `Exec` and `Protocol` mean the policy could not be evaluated at
//! all. They abort the run; policy violations never surface here.

use std::path::PathBuf;

/// Errors that stop a policy run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The package graph could not be parsed or resolved.
    #[error("failed to load {package}: {message}")]
    Load { package: String, message: String },

    /// A required external tool could not be launched.
    #[error("failed to run {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A tool produced output that does not decode as its documented format.
    #[error("malformed {stream} output: {message}")]
    Protocol {
        stream: &'static str,
        message: String,
    },

    /// Invalid configuration file or flag value.
    #[error("{}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn load(package: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            package: package.into(),
            message: message.into(),
        }
    }

    pub(crate) fn exec(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Exec {
            program: program.into(),
            source,
        }
    }

    pub(crate) fn protocol(stream: &'static str, message: impl Into<String>) -> Self {
        Self::Protocol {
            stream,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every policy is satisfied.
    Success = 0,
    /// At least one policy was violated.
    PolicyFailed = 1,
    /// Invalid configuration or arguments.
    ConfigError = 2,
    /// The policy could not be evaluated (load, exec or protocol failure).
    InternalError = 3,
}

impl ExitCode {
    /// Exit code for an error that aborted the run.
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<Error>() {
            Some(Error::Config { .. }) => Self::ConfigError,
            _ => Self::InternalError,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
