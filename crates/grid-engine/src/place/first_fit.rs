use config::GridConfig;
use tracing::{debug, trace};

use crate::{
    collision::{first_collision, is_free},
    geom::{Cell, Rect, Size, bottom_of},
};

/// Number of anchor slots across the first row.
const ANCHOR_SLOTS: u32 = 4;

/// Fixed "pleasing" cell for the `n`th widget of a sparse layout: the first
/// row is split into quarters, after which widgets start the next free row.
pub fn anchor_cell(n: usize, cols: u32, occupied: &[Rect]) -> Cell {
    let quarter = cols / ANCHOR_SLOTS;
    match u32::try_from(n) {
        Ok(slot) if slot < ANCHOR_SLOTS && (slot == 0 || quarter > 0) => {
            Cell::new(quarter * slot, 0)
        }
        _ => Cell::new(0, bottom_of(occupied)),
    }
}

/// First-fit placement for a new widget of `size`.
///
/// Empty layouts place at the origin. While fewer than `anchor_limit` widgets
/// exist the anchor cell is tried first; an anchor that is occupied or out of
/// bounds falls through to the scan.
pub fn first_fit(occupied: &[Rect], size: Size, cols: u32, cfg: &GridConfig) -> Cell {
    if occupied.is_empty() {
        return Cell::default();
    }
    let n = occupied.len();
    if n < cfg.anchor_limit {
        let anchor = anchor_cell(n, cols, occupied);
        if is_free(&Rect::from_parts(anchor, size), occupied, cols) {
            debug!(n, cell = %anchor, "first_fit: anchor cell");
            return anchor;
        }
        trace!(n, cell = %anchor, "first_fit: anchor occupied; scanning");
    }
    scan(occupied, size, cols, cfg.fallback_gap)
}

/// Scan rows top to bottom and columns left to right for the first free cell.
///
/// Every row at or below the lowest occupied bottom is empty, so the scan
/// always succeeds when `size.w <= cols`. Wider requests are appended at
/// `x = 0` below the layout plus `gap` rows.
///
/// Only row 0 and the bottom edges of occupied rectangles are visited: the
/// first free row in scan order is always one of them, so skipping the rest
/// yields the same cell as a row-by-row scan.
pub fn scan(occupied: &[Rect], size: Size, cols: u32, gap: u32) -> Cell {
    let ceiling = bottom_of(occupied);
    if size.w <= cols {
        let mut rows: Vec<u32> = occupied.iter().map(Rect::bottom).collect();
        rows.push(0);
        rows.sort_unstable();
        rows.dedup();
        for y in rows {
            for x in 0..=(cols - size.w) {
                let candidate = Rect::new(x, y, size.w, size.h);
                if first_collision(&candidate, occupied).is_none() {
                    trace!(cell = %candidate.cell(), "scan: free");
                    return candidate.cell();
                }
            }
        }
    }
    let cell = Cell::new(0, ceiling + gap);
    debug!(%size, cols, cell = %cell, "scan: exhausted; appending below layout");
    cell
}
