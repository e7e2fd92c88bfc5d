use thiserror::Error;
use widget_ids::WidgetId;

/// Errors surfaced by grid model operations.
///
/// Placement itself never fails: searches always end with a concrete cell.
/// These cover references to things that do not exist and bad configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No widget with this id in the active layout.
    #[error("widget not found: {0}")]
    WidgetNotFound(WidgetId),

    /// No breakpoint tier with this name.
    #[error("unknown breakpoint: {0}")]
    UnknownBreakpoint(String),

    /// A widget with this id already exists.
    #[error("duplicate widget id: {0}")]
    DuplicateWidget(WidgetId),

    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] config::Error),
}

/// Result alias for grid engine operations.
pub type Result<T> = std::result::Result<T, Error>;
