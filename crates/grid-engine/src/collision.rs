//! Pairwise rectangle overlap tests.

use std::fmt::{Display, Formatter, Result as FmtResult};

use widget_ids::WidgetId;

use crate::{geom::Rect, widget::Widget};

/// True iff `a` and `b` share at least one cell.
///
/// Touching edges do not collide. Symmetric; callers exclude self-comparison.
#[inline]
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    !(a.x >= b.right() || b.x >= a.right() || a.y >= b.bottom() || b.y >= a.bottom())
}

/// First rectangle in `others` that collides with `rect`.
#[inline]
pub fn first_collision<'a>(rect: &Rect, others: &'a [Rect]) -> Option<&'a Rect> {
    others.iter().find(|o| check_collision(rect, o))
}

/// True if `rect` fits in `cols` columns and collides with nothing in `others`.
#[inline]
pub fn is_free(rect: &Rect, others: &[Rect], cols: u32) -> bool {
    rect.in_bounds(cols) && first_collision(rect, others).is_none()
}

/// One overlapping pair reported by [`validate_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    /// Widget that appears earlier in the input.
    pub first: WidgetId,
    /// Rectangle of `first`.
    pub first_rect: Rect,
    /// Widget that appears later in the input.
    pub second: WidgetId,
    /// Rectangle of `second`.
    pub second_rect: Rect,
}

impl Overlap {
    /// Human-readable description of the overlap.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl Display for Overlap {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "widget '{}' {} overlaps widget '{}' {}",
            self.first, self.first_rect, self.second, self.second_rect
        )
    }
}

/// Every overlapping pair, in input order (`i < j`).
///
/// Quadratic; visible widget counts are in the tens.
pub fn validate_all(widgets: &[Widget]) -> Vec<Overlap> {
    let mut out = Vec::new();
    for (i, a) in widgets.iter().enumerate() {
        for b in &widgets[i + 1..] {
            if check_collision(&a.rect, &b.rect) {
                out.push(Overlap {
                    first: a.id.clone(),
                    first_rect: a.rect,
                    second: b.id.clone(),
                    second_rect: b.rect,
                });
            }
        }
    }
    out
}

/// True if no two widgets overlap.
pub fn is_overlap_free(widgets: &[Widget]) -> bool {
    widgets.iter().enumerate().all(|(i, a)| {
        widgets[i + 1..]
            .iter()
            .all(|b| !check_collision(&a.rect, &b.rect))
    })
}
