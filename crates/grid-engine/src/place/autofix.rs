//! Batch overlap repair.
//!
//! Widgets are visited in priority order: pinned widgets first, then by row
//! and column. Each widget is tested only against the widgets already settled
//! in this pass, so the top-left widget never moves and the result is a fixed
//! point. A colliding widget is shifted just past its collider on the same row,
//! else to the start of the row beneath it; if that spot is taken too, the
//! first-fit scan supplies a free cell.

use std::cmp::Reverse;

use config::GridConfig;
use serde::Serialize;
use tracing::{debug, trace};
use widget_ids::WidgetId;

use super::first_fit::scan;
use crate::{
    collision::{first_collision, is_free},
    geom::Rect,
    widget::Widget,
};

/// One widget relocation performed by a repair pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Move {
    /// Widget that moved.
    pub id: WidgetId,
    /// Rectangle before the pass.
    pub from: Rect,
    /// Rectangle after the pass.
    pub to: Rect,
}

/// Result of a repair pass: the repaired widgets in input order and every
/// widget whose rectangle differs from the input.
#[derive(Clone, Debug, PartialEq)]
pub struct FixReport {
    /// Repaired widgets, in input order.
    pub widgets: Vec<Widget>,
    /// Widgets whose rectangle changed.
    pub moves: Vec<Move>,
}

impl FixReport {
    /// True if any widget was moved or resized.
    pub fn changed(&self) -> bool {
        !self.moves.is_empty()
    }
}

/// Remove every overlap from `widgets` in a grid of `cols` columns.
pub fn auto_fix(widgets: &[Widget], cols: u32, cfg: &GridConfig) -> FixReport {
    auto_fix_pinned(widgets, cols, cfg, &[])
}

/// As [`auto_fix`], but widgets in `pinned` are settled before all others and
/// keep their position unless two pinned widgets collide.
pub fn auto_fix_pinned(
    widgets: &[Widget],
    cols: u32,
    cfg: &GridConfig,
    pinned: &[WidgetId],
) -> FixReport {
    settle(widgets, widgets.to_vec(), cols, cfg, pinned)
}

/// Repair `working`, a possibly edited copy of `original`, and report moves
/// relative to `original`. Both slices must list the same widgets in the same
/// order.
pub(crate) fn settle(
    original: &[Widget],
    mut working: Vec<Widget>,
    cols: u32,
    cfg: &GridConfig,
    pinned: &[WidgetId],
) -> FixReport {
    let cols = cols.max(1);
    for w in &mut working {
        if !w.rect.in_bounds(cols) {
            trace!(id = %w.id, rect = %w.rect, cols, "autofix: clamping into bounds");
            if w.rect.w > cols {
                w.bounds = w.bounds.fit_cols(cols);
            }
            w.rect = w.rect.clamped_to(cols);
        }
    }

    let mut order: Vec<usize> = (0..working.len()).collect();
    order.sort_by_key(|&i| {
        let w = &working[i];
        (Reverse(pinned.contains(&w.id)), w.rect.y, w.rect.x)
    });

    let mut settled: Vec<Rect> = Vec::with_capacity(working.len());
    for i in order {
        let rect = resolve(working[i].rect, &settled, cols, cfg.fallback_gap);
        if rect != working[i].rect {
            debug!(id = %working[i].id, from = %working[i].rect, to = %rect, "autofix: shifted widget");
        }
        working[i].rect = rect;
        settled.push(rect);
    }

    let moves: Vec<Move> = original
        .iter()
        .zip(&working)
        .filter(|(o, w)| o.rect != w.rect)
        .map(|(o, w)| Move {
            id: w.id.clone(),
            from: o.rect,
            to: w.rect,
        })
        .collect();
    if !moves.is_empty() {
        debug!(moved = moves.len(), total = working.len(), "autofix: pass complete");
    }
    FixReport {
        widgets: working,
        moves,
    }
}

/// Free position for `rect` given the already settled rectangles.
fn resolve(rect: Rect, settled: &[Rect], cols: u32, gap: u32) -> Rect {
    let Some(other) = first_collision(&rect, settled) else {
        return rect;
    };
    let shifted = if other.right() + rect.w <= cols {
        Rect::new(other.right(), rect.y, rect.w, rect.h)
    } else {
        Rect::new(0, other.bottom(), rect.w, rect.h)
    };
    if is_free(&shifted, settled, cols) {
        return shifted;
    }
    trace!(rect = %rect, shifted = %shifted, "autofix: shift still collides; scanning");
    rect.at(scan(settled, rect.size(), cols, gap))
}

#[cfg(test)]
mod tests {
    use config::WidgetKind;

    use super::*;
    use crate::collision::is_overlap_free;

    fn w(id: &str, x: u32, y: u32, wd: u32, ht: u32) -> Widget {
        Widget::with_rect(id, WidgetKind::Gauge, Rect::new(x, y, wd, ht))
    }

    fn rects(report: &FixReport) -> Vec<Rect> {
        report.widgets.iter().map(|w| w.rect).collect()
    }

    #[test]
    fn top_left_widget_keeps_its_place() {
        let ws = vec![w("a", 0, 0, 4, 4), w("b", 2, 2, 4, 4)];
        let out = auto_fix(&ws, 12, &GridConfig::default());
        assert_eq!(rects(&out), vec![Rect::new(0, 0, 4, 4), Rect::new(4, 2, 4, 4)]);
        assert_eq!(out.moves.len(), 1);
        assert_eq!(out.moves[0].id.as_str(), "b");
    }

    #[test]
    fn priority_follows_position_not_input_order() {
        let ws = vec![w("late", 2, 2, 4, 4), w("early", 0, 0, 4, 4)];
        let out = auto_fix(&ws, 12, &GridConfig::default());
        assert_eq!(out.widgets[1].rect, Rect::new(0, 0, 4, 4));
        assert_eq!(out.widgets[0].id.as_str(), "late");
        assert_ne!(out.widgets[0].rect, Rect::new(2, 2, 4, 4));
    }

    #[test]
    fn no_room_to_the_right_moves_below_collider() {
        let ws = vec![w("a", 0, 0, 10, 2), w("b", 1, 1, 4, 2)];
        let out = auto_fix(&ws, 12, &GridConfig::default());
        assert_eq!(out.widgets[1].rect, Rect::new(0, 2, 4, 2));
    }

    #[test]
    fn blocked_shift_falls_back_to_scan() {
        // b collides with a; (4,0) is taken by c, so the scan finds (8,0).
        let ws = vec![w("a", 0, 0, 4, 2), w("c", 4, 0, 4, 2), w("b", 0, 1, 4, 2)];
        let out = auto_fix(&ws, 12, &GridConfig::default());
        assert_eq!(out.widgets[2].rect, Rect::new(8, 0, 4, 2));
        assert!(is_overlap_free(&out.widgets));
    }

    #[test]
    fn overlap_free_input_is_untouched() {
        let ws = vec![w("a", 0, 0, 4, 4), w("b", 4, 0, 4, 4), w("c", 0, 9, 2, 2)];
        let out = auto_fix(&ws, 12, &GridConfig::default());
        assert!(!out.changed());
        assert_eq!(out.widgets, ws);
    }

    #[test]
    fn out_of_bounds_widgets_are_clamped() {
        let ws = vec![w("a", 10, 0, 4, 2)];
        let out = auto_fix(&ws, 12, &GridConfig::default());
        assert_eq!(out.widgets[0].rect, Rect::new(8, 0, 4, 2));
        let out = auto_fix(&ws, 2, &GridConfig::default());
        assert_eq!(out.widgets[0].rect, Rect::new(0, 0, 2, 2));
        assert!(out.widgets[0].bounds.max_w <= 2);
    }

    #[test]
    fn pinned_widget_wins_over_top_left() {
        let ws = vec![w("a", 0, 0, 4, 4), w("b", 2, 2, 4, 4)];
        let out = auto_fix_pinned(&ws, 12, &GridConfig::default(), &[WidgetId::new("b")]);
        assert_eq!(out.widgets[1].rect, Rect::new(2, 2, 4, 4));
        assert_ne!(out.widgets[0].rect, Rect::new(0, 0, 4, 4));
        assert!(is_overlap_free(&out.widgets));
    }

    #[test]
    fn stacked_duplicates_spread_out() {
        let ws: Vec<Widget> = (0..6).map(|i| w(&format!("w{i}"), 0, 0, 4, 2)).collect();
        let out = auto_fix(&ws, 12, &GridConfig::default());
        assert!(is_overlap_free(&out.widgets));
        assert_eq!(out.widgets[0].rect, Rect::new(0, 0, 4, 2));
        assert_eq!(out.moves.len(), 5);
        let again = auto_fix(&out.widgets, 12, &GridConfig::default());
        assert!(!again.changed());
    }
}
