use grid_engine::Error as EngineError;
use thiserror::Error;
use widget_ids::WidgetId;

/// Errors raised while committing a drag session.
#[derive(Debug, Error)]
pub enum DragError {
    /// The model rejected the operation.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The dragged widget was removed while the session was open.
    #[error("dragged widget '{0}' no longer exists")]
    WidgetVanished(WidgetId),
}
