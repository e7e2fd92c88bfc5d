//! Widgets as seen by the grid: identity, kind, footprint and size bounds.

use config::{SizeSpec, WidgetKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use widget_ids::WidgetId;

use crate::geom::{Cell, Rect, Size};

/// Inclusive size limits for a widget, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBounds {
    /// Narrowest allowed width.
    pub min_w: u32,
    /// Shortest allowed height.
    pub min_h: u32,
    /// Widest allowed width.
    pub max_w: u32,
    /// Tallest allowed height.
    pub max_h: u32,
}

impl SizeBounds {
    /// Bounds that accept any positive size.
    pub const fn unbounded() -> Self {
        Self {
            min_w: 1,
            min_h: 1,
            max_w: u32::MAX,
            max_h: u32::MAX,
        }
    }

    /// Resolve a kind's size spec against a column count and row ceiling.
    pub fn from_spec(spec: &SizeSpec, cols: u32, max_rows: u32) -> Self {
        let max_w = spec.max_w.unwrap_or(cols).min(cols).max(1);
        let max_h = spec.max_h.unwrap_or(max_rows).min(max_rows).max(1);
        Self {
            min_w: spec.min_w.clamp(1, max_w),
            min_h: spec.min_h.clamp(1, max_h),
            max_w,
            max_h,
        }
    }

    /// Clamp `size` into these bounds.
    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            size.w.clamp(self.min_w, self.max_w.max(self.min_w)),
            size.h.clamp(self.min_h, self.max_h.max(self.min_h)),
        )
    }

    /// True if `size` lies within these bounds.
    pub fn admits(&self, size: Size) -> bool {
        (self.min_w..=self.max_w).contains(&size.w) && (self.min_h..=self.max_h).contains(&size.h)
    }

    /// Tighten the width limits to a grid of `cols` columns.
    pub fn fit_cols(self, cols: u32) -> Self {
        let max_w = self.max_w.min(cols).max(1);
        Self {
            min_w: self.min_w.min(max_w),
            max_w,
            ..self
        }
    }
}

/// A widget placed on the grid.
///
/// `config` is the renderer's opaque per-kind payload; the engine carries it
/// through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "WidgetRecord", from = "WidgetRecord")]
pub struct Widget {
    /// Stable identity, shared by every breakpoint layout.
    pub id: WidgetId,
    /// Widget type; selects the default size and bounds.
    pub kind: WidgetKind,
    /// Position and size on the grid.
    pub rect: Rect,
    /// Size limits enforced on resize and reflow.
    pub bounds: SizeBounds,
    /// Renderer payload, carried through untouched.
    pub config: Value,
}

impl Widget {
    /// Widget with explicit geometry and permissive bounds.
    pub fn with_rect(id: impl Into<WidgetId>, kind: WidgetKind, rect: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            rect,
            bounds: SizeBounds::unbounded(),
            config: Value::Null,
        }
    }

    /// Widget of `kind` at `cell`, sized from its size spec.
    pub fn from_spec(id: WidgetId, kind: WidgetKind, cell: Cell, size: Size, bounds: SizeBounds) -> Self {
        Self {
            id,
            kind,
            rect: Rect::from_parts(cell, bounds.clamp(size)),
            bounds,
            config: Value::Null,
        }
    }

    /// Top-left cell.
    #[inline]
    pub fn cell(&self) -> Cell {
        self.rect.cell()
    }

    /// Footprint in cells.
    #[inline]
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    /// Size `requested` clamped to this widget's bounds and to `cols`.
    pub fn clamp_size(&self, requested: Size, cols: u32) -> Size {
        self.bounds.fit_cols(cols).clamp(requested)
    }
}

/// Flat wire form of a widget, the shape handed to renderers and persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetRecord {
    /// Stable identity, shared by every breakpoint layout.
    pub id: WidgetId,
    /// Widget type; selects the default size and bounds.
    pub kind: WidgetKind,
    /// Column of the left edge.
    pub x: u32,
    /// Row of the top edge.
    pub y: u32,
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
    /// Narrowest allowed width.
    pub min_w: u32,
    /// Shortest allowed height.
    pub min_h: u32,
    /// Widest allowed width.
    pub max_w: u32,
    /// Tallest allowed height.
    pub max_h: u32,
    /// Renderer payload, carried through untouched.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub config: Value,
}

impl From<Widget> for WidgetRecord {
    fn from(w: Widget) -> Self {
        Self {
            id: w.id,
            kind: w.kind,
            x: w.rect.x,
            y: w.rect.y,
            w: w.rect.w,
            h: w.rect.h,
            min_w: w.bounds.min_w,
            min_h: w.bounds.min_h,
            max_w: w.bounds.max_w,
            max_h: w.bounds.max_h,
            config: w.config,
        }
    }
}

impl From<WidgetRecord> for Widget {
    fn from(r: WidgetRecord) -> Self {
        Self {
            id: r.id,
            kind: r.kind,
            rect: Rect::new(r.x, r.y, r.w, r.h),
            bounds: SizeBounds {
                min_w: r.min_w,
                min_h: r.min_h,
                max_w: r.max_w,
                max_h: r.max_h,
            },
            config: r.config,
        }
    }
}

/// Rectangles of `widgets`, in order.
pub fn rects_of(widgets: &[Widget]) -> Vec<Rect> {
    widgets.iter().map(|w| w.rect).collect()
}

/// Rectangles of every widget except the one with id `skip`.
pub fn rects_except(widgets: &[Widget], skip: &WidgetId) -> Vec<Rect> {
    widgets
        .iter()
        .filter(|w| &w.id != skip)
        .map(|w| w.rect)
        .collect()
}
