//! Drag sessions over a [`grid_engine::GridModel`].
//!
//! A session is an explicit value threaded through the input handlers; the
//! model is passed in on every call. Move events only compute a preview; the
//! model is mutated on drop.
mod error;
mod session;

pub use error::DragError;
pub use session::{
    DragPhase, DragPreview, DragResponse, DragSession, DragSource, DropOutcome, PointerEvent,
};
