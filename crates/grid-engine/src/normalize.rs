//! Normalization of externally supplied widgets.
//!
//! Layouts coming from persistence or hand edits may have missing or
//! non-numeric coordinates, inverted size bounds, or widgets hanging off the
//! right edge. Nothing here rejects input: every raw widget becomes a widget
//! that satisfies the size and bounds invariants, with a diagnostic logged
//! for each repair. Overlaps are left for the auto-fix pass.

use config::{GridConfig, Maybe, WidgetKind};
use serde::{Deserialize, de::IgnoredAny};
use serde_json::Value;
use tracing::{debug, warn};
use widget_ids::WidgetId;

use crate::{
    geom::Rect,
    widget::{SizeBounds, Widget},
};

/// Width used when a raw widget has no usable width.
pub const DEFAULT_W: u32 = 3;
/// Height used when a raw widget has no usable height.
pub const DEFAULT_H: u32 = 2;
/// Coordinates are capped here so that edge arithmetic cannot overflow.
const MAX_COORD: u32 = u32::MAX / 4;

/// A scalar field as it appears in external data: number, numeric string,
/// or something unusable.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Lenient {
    /// Integer.
    Int(i64),
    /// Number with a fractional part.
    Float(f64),
    /// String, possibly numeric.
    Text(String),
    /// Anything else; treated as missing.
    Other(IgnoredAny),
}

impl Lenient {
    /// Integer value, flooring floats and parsing numeric strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) if v.is_finite() => Some(v.floor() as i64),
            Self::Text(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .map(|v| v.floor() as i64)
                })
            }
            _ => None,
        }
    }

    /// Textual value; numbers are rendered in decimal.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Self::Int(v) => Some(v.to_string()),
            Self::Float(v) if v.is_finite() => Some(v.to_string()),
            _ => None,
        }
    }
}

/// Widget as supplied by the persistence collaborator. Every field is optional
/// and camelCase aliases used by browser grid libraries are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWidget {
    /// Widget id; a fresh one is assigned when missing.
    #[serde(default, alias = "i")]
    pub id: Maybe<Lenient>,
    /// Widget type name.
    #[serde(default, alias = "type")]
    pub kind: Maybe<Lenient>,
    /// Column; defaults to 0.
    #[serde(default)]
    pub x: Maybe<Lenient>,
    /// Row; defaults to 0.
    #[serde(default)]
    pub y: Maybe<Lenient>,
    /// Width; defaults to 3.
    #[serde(default)]
    pub w: Maybe<Lenient>,
    /// Height; defaults to 2.
    #[serde(default)]
    pub h: Maybe<Lenient>,
    /// Minimum width; clamped to at most `w`.
    #[serde(default, alias = "minW")]
    pub min_w: Maybe<Lenient>,
    /// Minimum height; clamped to at most `h`.
    #[serde(default, alias = "minH")]
    pub min_h: Maybe<Lenient>,
    /// Maximum width; clamped between `w` and the column count.
    #[serde(default, alias = "maxW")]
    pub max_w: Maybe<Lenient>,
    /// Maximum height; clamped between `h` and the row ceiling.
    #[serde(default, alias = "maxH")]
    pub max_h: Maybe<Lenient>,
    /// Renderer payload.
    #[serde(default)]
    pub config: Maybe<Value>,
}

/// Read an integer field.
fn int(field: &Maybe<Lenient>) -> Option<i64> {
    field.as_option().and_then(Lenient::as_i64)
}

/// Read a strictly positive size field.
fn positive(field: &Maybe<Lenient>) -> Option<u32> {
    int(field)
        .filter(|v| *v > 0)
        .map(|v| u32::try_from(v).unwrap_or(MAX_COORD).min(MAX_COORD))
}

/// Read a coordinate, clamping negatives to zero.
fn coord(field: &Maybe<Lenient>) -> u32 {
    int(field)
        .map(|v| u32::try_from(v.max(0)).unwrap_or(MAX_COORD).min(MAX_COORD))
        .unwrap_or(0)
}

/// Normalize `raw` for a grid of `cols` columns.
///
/// `fresh_id` is called only when the raw widget has no usable id.
pub fn normalize_widget(
    raw: &RawWidget,
    cols: u32,
    cfg: &GridConfig,
    fresh_id: impl FnOnce() -> WidgetId,
) -> Widget {
    let cols = cols.max(1);
    let max_rows = cfg.max_widget_rows.max(1);
    let id = raw
        .id
        .as_option()
        .and_then(Lenient::as_text)
        .map(WidgetId::new)
        .unwrap_or_else(fresh_id);
    let kind = raw
        .kind
        .as_option()
        .and_then(Lenient::as_text)
        .map(WidgetKind::from)
        .unwrap_or_else(|| WidgetKind::from("unknown"));
    if !cfg.sizes.contains(&kind) {
        debug!(%id, %kind, "normalize: unknown kind; using fallback size bounds");
    }
    let spec = cfg.size_for(&kind);

    let mut w = positive(&raw.w).unwrap_or_else(|| {
        debug!(%id, "normalize: missing or invalid w; defaulting to {}", DEFAULT_W);
        DEFAULT_W
    });
    let mut h = positive(&raw.h).unwrap_or_else(|| {
        debug!(%id, "normalize: missing or invalid h; defaulting to {}", DEFAULT_H);
        DEFAULT_H
    });
    if w > cols {
        debug!(%id, w, cols, "normalize: width exceeds columns");
        w = cols;
    }
    if h > max_rows {
        debug!(%id, h, max_rows, "normalize: height exceeds row ceiling");
        h = max_rows;
    }

    let mut min_w = positive(&raw.min_w).unwrap_or(spec.min_w.max(1));
    let mut min_h = positive(&raw.min_h).unwrap_or(spec.min_h.max(1));
    if min_w > w {
        warn!(%id, min_w, w, "normalize: min_w exceeds w; clamping min_w");
        min_w = w;
    }
    if min_h > h {
        warn!(%id, min_h, h, "normalize: min_h exceeds h; clamping min_h");
        min_h = h;
    }
    let max_w = positive(&raw.max_w)
        .or(spec.max_w)
        .unwrap_or(cols)
        .max(w)
        .min(cols);
    let max_h = positive(&raw.max_h)
        .or(spec.max_h)
        .unwrap_or(max_rows)
        .max(h)
        .min(max_rows);

    let mut x = coord(&raw.x);
    let y = coord(&raw.y);
    if x + w > cols {
        debug!(%id, x, w, cols, "normalize: widget past right edge; shifting left");
        x = cols - w;
    }

    Widget {
        id,
        kind,
        rect: Rect::new(x, y, w, h),
        bounds: SizeBounds {
            min_w,
            min_h,
            max_w,
            max_h,
        },
        config: raw.config.as_option().cloned().unwrap_or(Value::Null),
    }
}
