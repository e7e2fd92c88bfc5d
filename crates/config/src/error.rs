//! Error types for configuration loading and validation.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced while loading, parsing, or validating a grid configuration.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// RON syntax or shape error.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// Human-readable error message, including the parser's location.
        message: String,
    },
    #[error("{message}")]
    /// Semantically invalid configuration (e.g. a breakpoint with zero columns).
    Validation {
        /// Optional path associated with the validation error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Build a validation error without a path; loaders attach one later.
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            path: None,
            message: message.into(),
        }
    }

    /// Attach `path` to this error when it does not carry one yet.
    pub(crate) fn with_path(self, p: &Path) -> Self {
        match self {
            Self::Read { path: None, message } => Self::Read {
                path: Some(p.to_path_buf()),
                message,
            },
            Self::Parse { path: None, message } => Self::Parse {
                path: Some(p.to_path_buf()),
                message,
            },
            Self::Validation { path: None, message } => Self::Validation {
                path: Some(p.to_path_buf()),
                message,
            },
            other => other,
        }
    }

    /// Render a human-friendly error message including the path when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse { path, message } => match path {
                Some(p) => format!("Config parse error at {}\n{}", p.display(), message),
                None => format!("Config parse error\n{}", message),
            },
            Self::Validation { path, message } => match path {
                Some(p) => format!("Config validation error at {}\n{}", p.display(), message),
                None => format!("Config validation error\n{}", message),
            },
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
        }
    }
}
