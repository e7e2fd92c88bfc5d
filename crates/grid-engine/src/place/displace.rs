//! Push-right / push-down displacement for widgets under a drag.

use std::slice;

use config::GridConfig;
use serde::Serialize;
use tracing::{debug, trace};
use widget_ids::WidgetId;

use super::autofix::{FixReport, settle};
use crate::{
    collision::check_collision,
    error::{Error, Result},
    geom::{Rect, Size},
    widget::Widget,
};

/// Direction a widget was pushed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Push {
    /// Shifted right on the same rows.
    Right,
    /// Moved below the drop.
    Down,
}

/// A widget the drag would move out of the way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Displacement {
    /// Widget being pushed.
    pub id: WidgetId,
    /// Current rectangle.
    pub from: Rect,
    /// Rectangle after the push.
    pub to: Rect,
    /// Direction of the push.
    pub push: Push,
}

/// Where `rect` goes when a widget of size `pusher` lands on it.
///
/// Push right to `min(x + pusher.w, cols - rect.w)`, which may be a partial
/// shift near the right edge. With no room to the right at all, push down by
/// the pusher's height plus one row.
pub fn displaced_rect(rect: &Rect, pusher: Size, cols: u32) -> (Rect, Push) {
    let x = rect.x.saturating_add(pusher.w).min(cols.saturating_sub(rect.w));
    if x > rect.x {
        (Rect::new(x, rect.y, rect.w, rect.h), Push::Right)
    } else {
        (
            Rect::new(rect.x, rect.y + pusher.h + 1, rect.w, rect.h),
            Push::Down,
        )
    }
}

/// Widgets that `drop` would overlap, each with its displaced rectangle.
///
/// `dragged` is excluded from the test. Nothing is mutated; this is the
/// per-event preview.
pub fn preview_displacements(
    widgets: &[Widget],
    dragged: Option<&WidgetId>,
    drop: Rect,
    cols: u32,
) -> Vec<Displacement> {
    widgets
        .iter()
        .filter(|w| Some(&w.id) != dragged)
        .filter(|w| check_collision(&drop, &w.rect))
        .map(|w| {
            let (to, push) = displaced_rect(&w.rect, drop.size(), cols);
            Displacement {
                id: w.id.clone(),
                from: w.rect,
                to,
                push,
            }
        })
        .collect()
}

/// Commit a drop of `dragged` onto `drop`.
///
/// Widgets under the drop are pushed; a pushed widget in turn pushes what it
/// now overlaps, for at most `widgets.len()` rounds. The auto-fix pass then
/// runs with the dragged widget pinned, so the result is overlap-free even if
/// the cascade did not settle.
pub fn commit_displacements(
    widgets: &[Widget],
    dragged: &WidgetId,
    drop: Rect,
    cols: u32,
    cfg: &GridConfig,
) -> Result<FixReport> {
    let idx = widgets
        .iter()
        .position(|w| &w.id == dragged)
        .ok_or_else(|| Error::WidgetNotFound(dragged.clone()))?;
    let mut working = widgets.to_vec();
    working[idx].rect = drop.clamped_to(cols);

    let mut pushers = vec![idx];
    let mut rounds = 0;
    while !pushers.is_empty() && rounds < widgets.len() {
        rounds += 1;
        let mut next: Vec<usize> = Vec::new();
        for &p in &pushers {
            let pusher = working[p].rect;
            for j in 0..working.len() {
                if j == idx || j == p || !check_collision(&pusher, &working[j].rect) {
                    continue;
                }
                let (to, push) = displaced_rect(&working[j].rect, pusher.size(), cols);
                trace!(id = %working[j].id, from = %working[j].rect, to = %to, ?push, round = rounds, "displace: push");
                working[j].rect = to;
                if !next.contains(&j) {
                    next.push(j);
                }
            }
        }
        pushers = next;
    }
    debug!(id = %dragged, drop = %working[idx].rect, rounds, "displace: cascade finished");

    Ok(settle(widgets, working, cols, cfg, slice::from_ref(dragged)))
}
