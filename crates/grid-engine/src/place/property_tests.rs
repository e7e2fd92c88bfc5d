use config::{GridConfig, WidgetKind};
use proptest::prelude::*;
use widget_ids::WidgetId;

use super::{auto_fix, commit_displacements, first_fit, nearest_free};
use crate::{
    collision::{check_collision, is_overlap_free},
    geom::{Cell, Rect, Size},
    mapper::GridMetrics,
    widget::{Widget, rects_of},
};

fn size_strategy(cols: u32) -> impl Strategy<Value = Size> {
    (1..=cols, 1u32..6).prop_map(|(w, h)| Size::new(w, h))
}

/// Arbitrary, possibly overlapping and out-of-bounds widgets.
fn widgets_strategy(cols: u32) -> impl Strategy<Value = Vec<Widget>> {
    prop::collection::vec((0u32..16, 0u32..12, 1u32..8, 1u32..6), 0..14).prop_map(move |rects| {
        rects
            .into_iter()
            .enumerate()
            .map(|(i, (x, y, w, h))| {
                Widget::with_rect(
                    format!("w{i}"),
                    WidgetKind::Gauge,
                    Rect::new(x, y, w.min(cols), h),
                )
            })
            .collect()
    })
}

/// Overlap-free, in-bounds layouts built by repeated first-fit.
fn packed_strategy(cols: u32) -> impl Strategy<Value = Vec<Widget>> {
    prop::collection::vec(size_strategy(cols), 0..12).prop_map(move |sizes| {
        let cfg = GridConfig::default();
        let mut rects: Vec<Rect> = Vec::new();
        for size in sizes {
            let cell = first_fit(&rects, size, cols, &cfg);
            rects.push(Rect::from_parts(cell, size));
        }
        rects
            .into_iter()
            .enumerate()
            .map(|(i, r)| Widget::with_rect(format!("p{i}"), WidgetKind::Toggle, r))
            .collect()
    })
}

proptest! {
    #[test]
    fn autofix_output_is_overlap_free_and_in_bounds(
        cols in prop::sample::select(vec![2u32, 4, 6, 10, 12]),
        ws in widgets_strategy(12),
    ) {
        let out = auto_fix(&ws, cols, &GridConfig::default());
        prop_assert_eq!(out.widgets.len(), ws.len());
        prop_assert!(is_overlap_free(&out.widgets));
        for w in &out.widgets {
            prop_assert!(w.rect.in_bounds(cols));
        }
        for (a, b) in ws.iter().zip(&out.widgets) {
            prop_assert_eq!(&a.id, &b.id);
        }
    }

    #[test]
    fn autofix_is_idempotent(ws in widgets_strategy(12)) {
        let cfg = GridConfig::default();
        let once = auto_fix(&ws, 12, &cfg);
        let twice = auto_fix(&once.widgets, 12, &cfg);
        prop_assert!(!twice.changed());
        prop_assert_eq!(twice.widgets, once.widgets);
    }

    #[test]
    fn autofix_leaves_free_layouts_alone(ws in packed_strategy(12)) {
        let out = auto_fix(&ws, 12, &GridConfig::default());
        prop_assert!(out.moves.is_empty());
        prop_assert_eq!(out.widgets, ws);
    }

    #[test]
    fn first_fit_is_deterministic_and_free(
        ws in packed_strategy(10),
        size in size_strategy(10),
    ) {
        let cfg = GridConfig::default();
        let occupied = rects_of(&ws);
        let a = first_fit(&occupied, size, 10, &cfg);
        let b = first_fit(&occupied, size, 10, &cfg);
        prop_assert_eq!(a, b);
        let rect = Rect::from_parts(a, size);
        prop_assert!(rect.in_bounds(10));
        prop_assert!(occupied.iter().all(|o| !check_collision(&rect, o)));
    }

    #[test]
    fn nearest_stays_in_bounds(
        ws in packed_strategy(12),
        size in size_strategy(12),
        x in 0u32..20,
        y in 0u32..20,
    ) {
        let cell = nearest_free(&rects_of(&ws), Cell::new(x, y), size, 12, 20);
        prop_assert!(cell.x + size.w <= 12);
    }

    #[test]
    fn nearest_on_empty_grid_returns_desired(
        size in size_strategy(12),
        x in 0u32..12,
        y in 0u32..50,
    ) {
        prop_assume!(x + size.w <= 12);
        prop_assert_eq!(nearest_free(&[], Cell::new(x, y), size, 12, 20), Cell::new(x, y));
    }

    #[test]
    fn commit_keeps_layout_overlap_free(
        ws in packed_strategy(12),
        pick in any::<prop::sample::Index>(),
        x in 0u32..12,
        y in 0u32..10,
    ) {
        prop_assume!(!ws.is_empty());
        let dragged: WidgetId = ws[pick.index(ws.len())].id.clone();
        let rect = ws[pick.index(ws.len())].rect.at(Cell::new(x, y));
        let out = commit_displacements(&ws, &dragged, rect, 12, &GridConfig::default()).unwrap();
        prop_assert!(is_overlap_free(&out.widgets));
        let moved = out.widgets.iter().find(|w| w.id == dragged).unwrap();
        prop_assert_eq!(moved.rect, rect.clamped_to(12));
    }

    #[test]
    fn pointer_cells_fit_the_widget(
        cols in 1u32..16,
        container in -100.0f64..4000.0,
        px in -500.0f64..5000.0,
        py in -500.0f64..5000.0,
        widget_w in 1u32..16,
    ) {
        let m = GridMetrics { cols, row_height: 80, margin_x: 16, margin_y: 16 };
        let cell = m.pointer_to_cell(px, py, container, widget_w);
        prop_assert!(cell.x <= cols.saturating_sub(widget_w));
    }
}
