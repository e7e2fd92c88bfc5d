//! Error handling for the dashgrid binary.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for dashgrid commands.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Configuration parsing or validation errors.
    #[error("{}", .0.pretty())]
    Config(#[from] config::Error),
    /// Errors surfaced by the grid model.
    #[error("Grid error: {0}")]
    Engine(#[from] grid_engine::Error),
    /// Errors surfaced while replaying a drag session.
    #[error("Drag error: {0}")]
    Drag(#[from] dragmode::DragError),
    /// A layout or script file could not be parsed or written.
    #[error("{}: {message}", path.display())]
    Layout {
        /// File that failed.
        path: PathBuf,
        /// Parser or serializer message.
        message: String,
    },
    /// `check` found overlapping widgets.
    #[error("{0} overlapping pair(s) found")]
    OverlapsFound(usize),
}

impl Error {
    /// Build a layout error for `path`.
    pub fn layout(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Layout {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
