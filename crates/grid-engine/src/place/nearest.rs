use tracing::{debug, trace};

use crate::{
    collision::is_free,
    geom::{Cell, Rect, Size, bottom_of},
};

/// Offsets on the square ring of radius `r`, in the fixed search order:
/// `dx` ascending, then `dy` ascending, skipping the ring's interior.
///
/// The order decides which of several equidistant free cells wins, so it
/// must not change.
pub fn ring_offsets(r: u32) -> impl Iterator<Item = (i64, i64)> {
    let r = i64::from(r);
    (-r..=r)
        .flat_map(move |dx| (-r..=r).map(move |dy| (dx, dy)))
        .filter(move |(dx, dy)| dx.abs().max(dy.abs()) == r)
}

/// Closest free cell to `desired` for a widget of `size`.
///
/// `desired.x` is first pulled into `[0, cols - w]`. Rings of radius
/// `0..=max_radius` are then searched; when all are exhausted the widget is
/// appended at `x = 0` below every occupied rectangle.
pub fn nearest_free(
    occupied: &[Rect],
    desired: Cell,
    size: Size,
    cols: u32,
    max_radius: u32,
) -> Cell {
    let max_x = cols.saturating_sub(size.w);
    let origin = Cell::new(desired.x.min(max_x), desired.y);
    if origin != desired {
        trace!(desired = %desired, origin = %origin, "nearest: clamped desired cell");
    }
    for r in 0..=max_radius {
        for (dx, dy) in ring_offsets(r) {
            let x = i64::from(origin.x) + dx;
            let y = i64::from(origin.y) + dy;
            let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
                continue;
            };
            let candidate = Rect::new(x, y, size.w, size.h);
            if is_free(&candidate, occupied, cols) {
                if r > 0 {
                    debug!(desired = %desired, found = %candidate.cell(), radius = r, "nearest: displaced");
                }
                return candidate.cell();
            }
        }
    }
    let cell = Cell::new(0, bottom_of(occupied));
    debug!(desired = %desired, cell = %cell, max_radius, "nearest: rings exhausted; appending");
    cell
}
