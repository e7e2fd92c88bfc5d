//! Resolved grid configuration.

use std::collections::HashSet;

use crate::{
    Breakpoint, Error, SizeSpec, SizeTable, WidgetKind,
    defaults::{
        ANCHOR_LIMIT, FALLBACK_GAP, MARGIN_X, MARGIN_Y, MAX_WIDGET_ROWS, ROW_HEIGHT,
        SEARCH_RADIUS, default_breakpoints,
    },
};

/// Fully resolved and validated grid configuration.
///
/// Breakpoints are private so that the list is always non-empty, sorted by
/// descending `min_width`, and free of zero-column tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Breakpoint tiers, widest first.
    breakpoints: Vec<Breakpoint>,
    /// Fixed row height in pixels.
    pub row_height: u32,
    /// Horizontal margin between cells in pixels.
    pub margin_x: u32,
    /// Vertical margin between cells in pixels.
    pub margin_y: u32,
    /// Number of initial widgets that use fixed anchor cells.
    pub anchor_limit: usize,
    /// Largest ring radius tried by the nearest-position search.
    pub search_radius: u32,
    /// Empty rows left above a widget appended below the layout.
    pub fallback_gap: u32,
    /// Height ceiling applied when normalizing external widgets.
    pub max_widget_rows: u32,
    /// Default and minimum sizes per widget kind.
    pub sizes: SizeTable,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            breakpoints: default_breakpoints(),
            row_height: ROW_HEIGHT,
            margin_x: MARGIN_X,
            margin_y: MARGIN_Y,
            anchor_limit: ANCHOR_LIMIT,
            search_radius: SEARCH_RADIUS,
            fallback_gap: FALLBACK_GAP,
            max_widget_rows: MAX_WIDGET_ROWS,
            sizes: SizeTable::default(),
        }
    }
}

impl GridConfig {
    /// Replace the breakpoint list after validating it.
    pub fn set_breakpoints(&mut self, mut breakpoints: Vec<Breakpoint>) -> Result<(), Error> {
        if breakpoints.is_empty() {
            return Err(Error::invalid("at least one breakpoint is required"));
        }
        let mut seen = HashSet::new();
        for bp in &breakpoints {
            if bp.cols == 0 {
                return Err(Error::invalid(format!(
                    "breakpoint '{}' must have a positive column count",
                    bp.name
                )));
            }
            if !seen.insert(bp.name.as_str()) {
                return Err(Error::invalid(format!(
                    "breakpoint '{}' is defined more than once",
                    bp.name
                )));
            }
        }
        breakpoints.sort_by(|a, b| b.min_width.cmp(&a.min_width));
        self.breakpoints = breakpoints;
        Ok(())
    }

    /// All breakpoints, widest first.
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Widest tier; used as the initial active breakpoint.
    pub fn largest(&self) -> &Breakpoint {
        &self.breakpoints[0]
    }

    /// Look up a breakpoint by name.
    pub fn breakpoint(&self, name: &str) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|bp| bp.name == name)
    }

    /// Select the tier for a container `width` in pixels.
    ///
    /// Widths narrower than every tier select the narrowest tier.
    pub fn breakpoint_for_width(&self, width: f64) -> &Breakpoint {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.breakpoints
            .iter()
            .find(|bp| width >= f64::from(bp.min_width))
            .unwrap_or_else(|| self.narrowest())
    }

    /// Narrowest tier.
    pub fn narrowest(&self) -> &Breakpoint {
        &self.breakpoints[self.breakpoints.len() - 1]
    }

    /// Default size for `kind`.
    pub fn size_for(&self, kind: &WidgetKind) -> SizeSpec {
        self.sizes.size_for(kind)
    }

    /// Check scalar settings and the size table.
    pub fn validate(&self) -> Result<(), Error> {
        if self.row_height == 0 {
            return Err(Error::invalid("row_height must be positive"));
        }
        if self.max_widget_rows == 0 {
            return Err(Error::invalid("max_widget_rows must be positive"));
        }
        for (kind, spec) in self.sizes.iter() {
            if let Some(problem) = spec.problem() {
                return Err(Error::invalid(format!("size for '{kind}': {problem}")));
            }
        }
        Ok(())
    }
}
