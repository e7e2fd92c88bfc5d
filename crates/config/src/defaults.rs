// Defaults and constants for grid configuration

use crate::{Breakpoint, SizeSpec, WidgetKind};

// Breakpoint tiers: (name, min container width in px, columns)
pub(crate) const BREAKPOINTS: [(&str, u32, u32); 5] = [
    ("lg", 1200, 12),
    ("md", 996, 10),
    ("sm", 768, 6),
    ("xs", 480, 4),
    ("xxs", 0, 2),
];

// Grid metrics
pub(crate) const ROW_HEIGHT: u32 = 80;
pub(crate) const MARGIN_X: u32 = 16;
pub(crate) const MARGIN_Y: u32 = 16;

// Placement tuning
pub(crate) const ANCHOR_LIMIT: usize = 4;
pub(crate) const SEARCH_RADIUS: u32 = 20;
pub(crate) const FALLBACK_GAP: u32 = 1;
pub(crate) const MAX_WIDGET_ROWS: u32 = 24;

/// Size used for widget kinds without an entry in the size table.
pub(crate) const UNKNOWN_SIZE: SizeSpec = SizeSpec {
    w: 3,
    h: 3,
    min_w: 1,
    min_h: 1,
    max_w: None,
    max_h: None,
};

pub(crate) fn default_breakpoints() -> Vec<Breakpoint> {
    BREAKPOINTS
        .iter()
        .map(|(name, min_width, cols)| Breakpoint::new(*name, *min_width, *cols))
        .collect()
}

/// Built-in default and minimum sizes per widget kind.
pub(crate) fn default_sizes() -> Vec<(WidgetKind, SizeSpec)> {
    vec![
        (WidgetKind::Gauge, SizeSpec::new(3, 3, 2, 2)),
        (WidgetKind::Map, SizeSpec::new(6, 5, 4, 4)),
        (WidgetKind::Toggle, SizeSpec::new(2, 2, 2, 2)),
        (WidgetKind::LineChart, SizeSpec::new(6, 4, 4, 3)),
        (WidgetKind::BarChart, SizeSpec::new(6, 4, 4, 3)),
        (WidgetKind::Table, SizeSpec::new(6, 4, 4, 3)),
        (WidgetKind::Metric, SizeSpec::new(2, 2, 2, 2)),
        (WidgetKind::Text, SizeSpec::new(4, 2, 2, 1)),
    ]
}
