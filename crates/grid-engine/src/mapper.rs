//! Pixel/cell conversion for the active breakpoint.
//!
//! Column width is derived from the live container width on every call so
//! that it tracks responsive resizing; row height is fixed by configuration.

use config::{Breakpoint, GridConfig};
use serde::Serialize;

use crate::geom::{Cell, Rect};

/// Pixel geometry of one breakpoint tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridMetrics {
    /// Column count of the tier.
    pub cols: u32,
    /// Row height in pixels.
    pub row_height: u32,
    /// Horizontal gap between columns and at both edges.
    pub margin_x: u32,
    /// Vertical gap between rows and at the top.
    pub margin_y: u32,
}

/// A rectangle in container pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PixelRect {
    /// Offset from the container's left edge.
    pub left: f64,
    /// Offset from the container's top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// Pointer values that are non-finite or negative count as zero.
fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

impl GridMetrics {
    /// Metrics for `breakpoint` under `cfg`.
    pub fn new(cfg: &GridConfig, breakpoint: &Breakpoint) -> Self {
        Self {
            cols: breakpoint.cols.max(1),
            row_height: cfg.row_height,
            margin_x: cfg.margin_x,
            margin_y: cfg.margin_y,
        }
    }

    /// Width of one column for a container `container_px` wide. May be zero or
    /// negative for containers narrower than the margins.
    pub fn cell_width(&self, container_px: f64) -> f64 {
        let cols = f64::from(self.cols);
        (sanitize(container_px) - f64::from(self.margin_x) * (cols + 1.0)) / cols
    }

    /// Quantize a pointer offset to the cell a widget `widget_w` wide would
    /// occupy. `x` is clamped to `[0, cols - widget_w]`; `y` is unbounded.
    pub fn pointer_to_cell(&self, px: f64, py: f64, container_px: f64, widget_w: u32) -> Cell {
        let max_x = self.cols.saturating_sub(widget_w);
        let cw = self.cell_width(container_px);
        let x = if cw > 0.0 {
            let col = (sanitize(px) / (cw + f64::from(self.margin_x))).floor();
            clamp_to_u32(col).min(max_x)
        } else {
            0
        };
        let pitch_y = f64::from(self.row_height) + f64::from(self.margin_y);
        let y = if pitch_y > 0.0 {
            clamp_to_u32((sanitize(py) / pitch_y).floor())
        } else {
            0
        };
        Cell::new(x, y)
    }

    /// Pixel rectangle that `rect` covers in a container `container_px` wide.
    pub fn cell_to_pixels(&self, rect: &Rect, container_px: f64) -> PixelRect {
        let cw = self.cell_width(container_px).max(0.0);
        let rh = f64::from(self.row_height);
        let mx = f64::from(self.margin_x);
        let my = f64::from(self.margin_y);
        let (x, y) = (f64::from(rect.x), f64::from(rect.y));
        let (w, h) = (f64::from(rect.w), f64::from(rect.h));
        PixelRect {
            left: mx + x * (cw + mx),
            top: my + y * (rh + my),
            width: w * cw + (w - 1.0).max(0.0) * mx,
            height: h * rh + (h - 1.0).max(0.0) * my,
        }
    }
}

/// Convert a non-negative float to `u32`, saturating.
fn clamp_to_u32(v: f64) -> u32 {
    if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        v as u32
    }
}
