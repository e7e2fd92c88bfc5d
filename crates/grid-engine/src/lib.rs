//! grid-engine: placement and collision resolution for dashboard grids.
//!
//! Widgets live on an integer grid whose column count depends on the active
//! breakpoint. The crate provides:
//! - the collision primitive and pairwise overlap validation,
//! - first-fit placement with anchor cells for sparse layouts,
//! - nearest-free resolution by expanding square rings,
//! - a deterministic auto-fix pass that removes every overlap,
//! - push-right/push-down displacement for drags,
//! - pixel/cell mapping for the active breakpoint,
//! - normalization of externally supplied widgets,
//! - [`GridModel`], which keeps one layout per breakpoint and enforces the
//!   overlap-free invariant after every operation.
//!
//! Nothing here blocks or performs I/O.

pub mod collision;
mod error;
pub mod geom;
pub mod mapper;
pub mod model;
pub mod normalize;
pub mod place;
mod shared;
pub mod widget;

pub use collision::{Overlap, check_collision, validate_all};
pub use error::{Error, Result};
pub use geom::{Cell, Rect, Size};
pub use mapper::{GridMetrics, PixelRect};
pub use model::{GridModel, PlacementRequest, Target};
pub use normalize::RawWidget;
pub use place::{Displacement, FixReport, Move, Push, auto_fix, auto_fix_pinned};
pub use shared::SharedGrid;
pub use widget::{SizeBounds, Widget};
