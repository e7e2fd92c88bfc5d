//! Placement search, nearest-free resolution, batch repair and displacement.

mod autofix;
mod displace;
mod first_fit;
mod nearest;

pub use autofix::{FixReport, Move, auto_fix, auto_fix_pinned};
pub(crate) use autofix::settle;
pub use displace::{
    Displacement, Push, commit_displacements, displaced_rect, preview_displacements,
};
pub use first_fit::{anchor_cell, first_fit, scan};
pub use nearest::{nearest_free, ring_offsets};

#[cfg(test)]
mod property_tests;
