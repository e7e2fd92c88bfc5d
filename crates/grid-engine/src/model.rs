//! The committed widget collection, one layout per breakpoint tier.
//!
//! Every mutating operation ends with an overlap-free active layout. Widget
//! identity (id, kind and payload) is shared across tiers; only geometry is
//! per tier.

use std::{
    collections::{BTreeMap, HashSet},
    slice,
};

use config::{Breakpoint, GridConfig, WidgetKind};
use tracing::{debug, info, warn};
use widget_ids::WidgetId;

use crate::{
    collision::{Overlap, validate_all},
    error::{Error, Result},
    geom::{Cell, Rect, Size},
    mapper::GridMetrics,
    normalize::{Lenient, RawWidget, normalize_widget},
    place::{
        Displacement, FixReport, auto_fix, commit_displacements, first_fit, nearest_free,
        preview_displacements, settle,
    },
    widget::{SizeBounds, Widget, rects_except, rects_of},
};

/// Where a new widget should go.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target {
    /// A grid cell.
    Cell(Cell),
    /// A pointer offset inside the grid container, plus the container's width.
    Pixels {
        /// Horizontal offset in pixels.
        x: f64,
        /// Vertical offset in pixels.
        y: f64,
        /// Live width of the grid container in pixels.
        container_width: f64,
    },
}

/// Request to create a widget. Consumed by [`GridModel::add_widget`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Type of widget to create.
    pub kind: WidgetKind,
    /// Size in cells; the kind's default size when absent.
    pub size: Option<Size>,
    /// Explicit target; first-fit placement when absent.
    pub target: Option<Target>,
}

impl PlacementRequest {
    /// Request a widget of `kind` with its default size, placed first-fit.
    pub fn new(kind: impl Into<WidgetKind>) -> Self {
        Self {
            kind: kind.into(),
            size: None,
            target: None,
        }
    }

    /// Override the default size.
    pub fn with_size(mut self, w: u32, h: u32) -> Self {
        self.size = Some(Size::new(w, h));
        self
    }

    /// Target `cell`; the nearest free cell is used if it is taken.
    pub fn at(mut self, cell: Cell) -> Self {
        self.target = Some(Target::Cell(cell));
        self
    }

    /// Target a pointer position, mapped to a cell on the active tier.
    pub fn at_pixels(mut self, x: f64, y: f64, container_width: f64) -> Self {
        self.target = Some(Target::Pixels {
            x,
            y,
            container_width,
        });
        self
    }
}

/// Next generated id not rejected by `taken`.
fn next_free_id(counter: &mut u64, taken: impl Fn(&WidgetId) -> bool) -> WidgetId {
    loop {
        *counter += 1;
        let id = WidgetId::generated(*counter);
        if !taken(&id) {
            return id;
        }
    }
}

/// Fit a widget from another tier into `cols` columns.
fn reflow(mut widget: Widget, cols: u32) -> Widget {
    widget.bounds = widget.bounds.fit_cols(cols);
    let size = widget.bounds.clamp(widget.size());
    widget.rect = Rect::from_parts(widget.cell(), size).clamped_to(cols);
    widget
}

/// Canonical widget collection and grid configuration.
#[derive(Clone, Debug)]
pub struct GridModel {
    config: GridConfig,
    layouts: BTreeMap<String, Vec<Widget>>,
    active: Breakpoint,
    next_id: u64,
}

impl GridModel {
    /// Empty model on the widest breakpoint.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let active = config.largest().clone();
        let mut layouts = BTreeMap::new();
        layouts.insert(active.name.clone(), Vec::new());
        Ok(Self {
            config,
            layouts,
            active,
            next_id: 0,
        })
    }

    /// Configuration the model was built with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Tier whose layout operations currently apply to.
    pub fn active_breakpoint(&self) -> &Breakpoint {
        &self.active
    }

    /// Column count of the active tier.
    pub fn cols(&self) -> u32 {
        self.active.cols
    }

    /// Pixel metrics of the active tier.
    pub fn metrics(&self) -> GridMetrics {
        GridMetrics::new(&self.config, &self.active)
    }

    /// The committed active layout, in insertion order.
    pub fn widgets(&self) -> &[Widget] {
        self.layouts
            .get(&self.active.name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Layout of a named tier, if one exists yet.
    pub fn layout(&self, breakpoint: &str) -> Option<&[Widget]> {
        self.layouts.get(breakpoint).map(Vec::as_slice)
    }

    /// Widget `id` in the active layout.
    pub fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets().iter().find(|w| &w.id == id)
    }

    /// Overlapping pairs in the active layout. Empty after every completed
    /// operation.
    pub fn overlaps(&self) -> Vec<Overlap> {
        validate_all(self.widgets())
    }

    fn active_mut(&mut self) -> &mut Vec<Widget> {
        self.layouts.entry(self.active.name.clone()).or_default()
    }

    fn index_of(&self, id: &WidgetId) -> Result<usize> {
        self.widgets()
            .iter()
            .position(|w| &w.id == id)
            .ok_or_else(|| Error::WidgetNotFound(id.clone()))
    }

    fn id_in_use(&self, id: &WidgetId) -> bool {
        self.layouts.values().flatten().any(|w| &w.id == id)
    }

    fn fresh_id(&mut self) -> WidgetId {
        let mut counter = self.next_id;
        let id = next_free_id(&mut counter, |id| self.id_in_use(id));
        self.next_id = counter;
        id
    }

    /// Switch the active tier by name.
    ///
    /// A tier without a layout is derived from the current one: sizes are
    /// clamped to the new column count and the result is auto-fixed. The
    /// report of that derivation is returned.
    pub fn select_breakpoint(&mut self, name: &str) -> Result<Option<FixReport>> {
        let bp = self
            .config
            .breakpoint(name)
            .cloned()
            .ok_or_else(|| Error::UnknownBreakpoint(name.to_string()))?;
        if bp.name == self.active.name {
            return Ok(None);
        }
        let mut report = None;
        if !self.layouts.contains_key(&bp.name) {
            let fixed = self.derive(self.widgets(), bp.cols);
            debug!(from = %self.active.name, to = %bp.name, moved = fixed.moves.len(), "model: derived layout");
            self.layouts.insert(bp.name.clone(), fixed.widgets.clone());
            report = Some(fixed);
        }
        info!(breakpoint = %bp.name, cols = bp.cols, "model: active breakpoint");
        self.active = bp;
        Ok(report)
    }

    /// Reflow `source` into `cols` columns and auto-fix the result.
    fn derive(&self, source: &[Widget], cols: u32) -> FixReport {
        let reflowed: Vec<Widget> = source.iter().cloned().map(|w| reflow(w, cols)).collect();
        auto_fix(&reflowed, cols, &self.config)
    }

    /// Switch to the tier matching a container `width` in pixels.
    pub fn select_for_width(&mut self, width: f64) -> Result<Option<FixReport>> {
        let name = self.config.breakpoint_for_width(width).name.clone();
        self.select_breakpoint(&name)
    }

    /// Create a widget and return its id.
    ///
    /// An explicit target is resolved with the nearest-free search; without
    /// one the widget goes to the first free cell. The widget is also added to
    /// every other existing tier at that tier's first free cell.
    pub fn add_widget(&mut self, req: PlacementRequest) -> Result<WidgetId> {
        let cols = self.cols();
        let spec = self.config.size_for(&req.kind);
        let bounds = SizeBounds::from_spec(&spec, cols, self.config.max_widget_rows);
        let size = bounds.clamp(req.size.unwrap_or(Size::new(spec.w, spec.h)));
        let occupied = rects_of(self.widgets());
        let cell = match req.target {
            Some(Target::Cell(cell)) => {
                nearest_free(&occupied, cell, size, cols, self.config.search_radius)
            }
            Some(Target::Pixels {
                x,
                y,
                container_width,
            }) => {
                let cell = self.metrics().pointer_to_cell(x, y, container_width, size.w);
                nearest_free(&occupied, cell, size, cols, self.config.search_radius)
            }
            None => first_fit(&occupied, size, cols, &self.config),
        };
        let id = self.fresh_id();
        let widget = Widget::from_spec(id.clone(), req.kind, cell, size, bounds);
        debug!(%id, kind = %widget.kind, rect = %widget.rect, "model: added widget");
        self.insert_everywhere(widget);
        Ok(id)
    }

    /// Add a fully formed widget at the free cell nearest its position.
    pub fn insert_widget(&mut self, widget: Widget) -> Result<Cell> {
        if self.id_in_use(&widget.id) {
            return Err(Error::DuplicateWidget(widget.id));
        }
        let cols = self.cols();
        let mut widget = reflow(widget, cols);
        let cell = nearest_free(
            &rects_of(self.widgets()),
            widget.cell(),
            widget.size(),
            cols,
            self.config.search_radius,
        );
        widget.rect = widget.rect.at(cell);
        debug!(id = %widget.id, rect = %widget.rect, "model: inserted widget");
        self.insert_everywhere(widget);
        Ok(cell)
    }

    /// Push `widget` onto the active layout and, first-fit, onto every other.
    fn insert_everywhere(&mut self, widget: Widget) {
        for (name, layout) in &mut self.layouts {
            if *name == self.active.name {
                continue;
            }
            let Some(cols) = self.config.breakpoint(name).map(|bp| bp.cols) else {
                continue;
            };
            let mut other = reflow(widget.clone(), cols);
            let cell = first_fit(&rects_of(layout), other.size(), cols, &self.config);
            other.rect = other.rect.at(cell);
            layout.push(other);
        }
        self.active_mut().push(widget);
    }

    /// Remove a widget from every tier.
    pub fn remove_widget(&mut self, id: &WidgetId) -> Result<Widget> {
        let idx = self.index_of(id)?;
        let removed = self.active_mut().remove(idx);
        for layout in self.layouts.values_mut() {
            layout.retain(|w| &w.id != id);
        }
        debug!(%id, "model: removed widget");
        Ok(removed)
    }

    /// Displacements a drop of `rect` would cause, without committing.
    pub fn preview_move(&self, dragged: Option<&WidgetId>, rect: Rect) -> Vec<Displacement> {
        preview_displacements(self.widgets(), dragged, rect, self.cols())
    }

    /// Commit a move of `id` to `cell`, displacing what is in the way.
    pub fn move_widget(&mut self, id: &WidgetId, cell: Cell) -> Result<FixReport> {
        let idx = self.index_of(id)?;
        let drop = self.widgets()[idx].rect.at(cell);
        let report = commit_displacements(self.widgets(), id, drop, self.cols(), &self.config)?;
        debug!(%id, to = %cell, moved = report.moves.len(), "model: moved widget");
        *self.active_mut() = report.widgets.clone();
        Ok(report)
    }

    /// Resize `id`, clamped to its bounds and the column count. Neighbours
    /// make room through the auto-fix pass.
    pub fn resize_widget(&mut self, id: &WidgetId, w: u32, h: u32) -> Result<FixReport> {
        let idx = self.index_of(id)?;
        let cols = self.cols();
        let current = &self.widgets()[idx];
        let size = current.clamp_size(Size::new(w, h), cols);
        let mut working = self.widgets().to_vec();
        working[idx].rect = Rect::from_parts(current.cell(), size).clamped_to(cols);
        let report = settle(self.widgets(), working, cols, &self.config, slice::from_ref(id));
        debug!(%id, %size, moved = report.moves.len(), "model: resized widget");
        *self.active_mut() = report.widgets.clone();
        Ok(report)
    }

    /// Replace the layout of a tier with externally supplied widgets.
    ///
    /// Every widget is normalized, duplicate ids are reassigned, and the
    /// result is auto-fixed before it is stored. Other tiers holding a
    /// different widget set are dropped; the active tier, if dropped, is
    /// derived again from the loaded one.
    pub fn load_layout(&mut self, breakpoint: &str, raw: &[RawWidget]) -> Result<FixReport> {
        let cols = self
            .config
            .breakpoint(breakpoint)
            .map(|bp| bp.cols)
            .ok_or_else(|| Error::UnknownBreakpoint(breakpoint.to_string()))?;
        let mut taken: HashSet<WidgetId> = raw
            .iter()
            .filter_map(|r| r.id.as_option().and_then(Lenient::as_text))
            .map(WidgetId::new)
            .collect();
        taken.extend(
            self.layouts
                .iter()
                .filter(|(name, _)| name.as_str() != breakpoint)
                .flat_map(|(_, layout)| layout.iter().map(|w| w.id.clone())),
        );

        let mut counter = self.next_id;
        let mut seen: HashSet<WidgetId> = HashSet::new();
        let mut widgets = Vec::with_capacity(raw.len());
        for r in raw {
            let mut widget = normalize_widget(r, cols, &self.config, || {
                next_free_id(&mut counter, |id| taken.contains(id) || seen.contains(id))
            });
            if seen.contains(&widget.id) {
                let fresh =
                    next_free_id(&mut counter, |id| taken.contains(id) || seen.contains(id));
                warn!(id = %widget.id, %fresh, "load: duplicate widget id; reassigning");
                widget.id = fresh;
            }
            seen.insert(widget.id.clone());
            widgets.push(widget);
        }
        let highest = widgets
            .iter()
            .filter_map(|w| w.id.generated_index())
            .max()
            .unwrap_or(0);
        self.next_id = counter.max(highest);

        let report = auto_fix(&widgets, cols, &self.config);
        info!(
            breakpoint,
            widgets = report.widgets.len(),
            moved = report.moves.len(),
            "load: layout restored"
        );
        let loaded: HashSet<&WidgetId> = report.widgets.iter().map(|w| &w.id).collect();
        let stale: Vec<String> = self
            .layouts
            .iter()
            .filter(|(name, layout)| {
                name.as_str() != breakpoint
                    && layout.iter().map(|w| &w.id).collect::<HashSet<_>>() != loaded
            })
            .map(|(name, _)| name.clone())
            .collect();
        for name in &stale {
            debug!(breakpoint = %name, "load: dropping layout with a different widget set");
            self.layouts.remove(name);
        }
        self.layouts
            .insert(breakpoint.to_string(), report.widgets.clone());
        if !self.layouts.contains_key(&self.active.name) {
            let derived = self.derive(&report.widgets, self.active.cols);
            self.layouts.insert(self.active.name.clone(), derived.widgets);
        }
        Ok(report)
    }

    /// True if the active layout has no widgets.
    pub fn is_empty(&self) -> bool {
        self.widgets().is_empty()
    }

    /// Rectangles of the active layout, leaving out `skip`.
    pub fn occupied_except(&self, skip: &WidgetId) -> Vec<Rect> {
        rects_except(self.widgets(), skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::is_overlap_free;

    fn model() -> GridModel {
        GridModel::new(GridConfig::default()).unwrap()
    }

    fn raw(ron: &str) -> Vec<RawWidget> {
        ron::from_str(ron).unwrap()
    }

    #[test]
    fn new_model_starts_on_widest_tier() {
        let m = model();
        assert_eq!(m.active_breakpoint().name, "lg");
        assert_eq!(m.cols(), 12);
        assert!(m.is_empty());
    }

    #[test]
    fn added_widgets_follow_anchors_and_size_table() {
        let mut m = model();
        let a = m.add_widget(PlacementRequest::new("gauge")).unwrap();
        let b = m.add_widget(PlacementRequest::new("gauge")).unwrap();
        assert_eq!(a.as_str(), "widget-1");
        assert_eq!(m.widget(&a).unwrap().rect, Rect::new(0, 0, 3, 3));
        assert_eq!(m.widget(&b).unwrap().rect, Rect::new(3, 0, 3, 3));
        assert_eq!(m.widget(&a).unwrap().bounds.min_w, 2);
    }

    #[test]
    fn explicit_target_uses_nearest_free() {
        let mut m = model();
        let a = m
            .add_widget(PlacementRequest::new("map").at(Cell::new(5, 5)).with_size(4, 4))
            .unwrap();
        assert_eq!(m.widget(&a).unwrap().rect, Rect::new(5, 5, 4, 4));
        let b = m
            .add_widget(PlacementRequest::new("gauge").at(Cell::new(5, 5)))
            .unwrap();
        assert_eq!(m.widget(&b).unwrap().cell(), Cell::new(2, 2));
    }

    #[test]
    fn pixel_target_goes_through_mapper() {
        let mut m = model();
        let id = m
            .add_widget(PlacementRequest::new("toggle").at_pixels(530.0, 500.0, 1216.0))
            .unwrap();
        assert_eq!(m.widget(&id).unwrap().cell(), Cell::new(5, 5));
    }

    #[test]
    fn unknown_widget_errors() {
        let mut m = model();
        let ghost = WidgetId::new("ghost");
        assert_eq!(m.remove_widget(&ghost), Err(Error::WidgetNotFound(ghost.clone())));
        assert!(m.move_widget(&ghost, Cell::new(0, 0)).is_err());
        assert!(m.resize_widget(&ghost, 1, 1).is_err());
        assert!(matches!(m.select_breakpoint("huge"), Err(Error::UnknownBreakpoint(_))));
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut m = model();
        let id = m.add_widget(PlacementRequest::new("gauge")).unwrap();
        let dup = Widget::with_rect(id.clone(), WidgetKind::Gauge, Rect::new(0, 0, 1, 1));
        assert_eq!(m.insert_widget(dup), Err(Error::DuplicateWidget(id)));
    }

    #[test]
    fn move_displaces_and_stays_overlap_free() {
        let mut m = model();
        let a = m.add_widget(PlacementRequest::new("gauge")).unwrap();
        let b = m.add_widget(PlacementRequest::new("gauge")).unwrap();
        let report = m.move_widget(&b, Cell::new(0, 0)).unwrap();
        assert_eq!(m.widget(&b).unwrap().cell(), Cell::new(0, 0));
        assert_ne!(m.widget(&a).unwrap().cell(), Cell::new(0, 0));
        assert!(report.moves.iter().any(|mv| mv.id == a));
        assert!(m.overlaps().is_empty());
    }

    #[test]
    fn resize_respects_bounds_and_pushes_neighbours() {
        let mut m = model();
        let a = m.add_widget(PlacementRequest::new("gauge")).unwrap();
        let b = m.add_widget(PlacementRequest::new("gauge")).unwrap();
        m.resize_widget(&a, 1, 1).unwrap();
        assert_eq!(m.widget(&a).unwrap().size(), Size::new(2, 2));
        m.resize_widget(&a, 6, 3).unwrap();
        assert_eq!(m.widget(&a).unwrap().rect, Rect::new(0, 0, 6, 3));
        assert_ne!(m.widget(&b).unwrap().cell(), Cell::new(3, 0));
        assert!(m.overlaps().is_empty());
    }

    #[test]
    fn remove_drops_widget_from_every_tier() {
        let mut m = model();
        let a = m.add_widget(PlacementRequest::new("gauge")).unwrap();
        m.select_breakpoint("sm").unwrap();
        m.remove_widget(&a).unwrap();
        assert!(m.layout("lg").unwrap().is_empty());
        assert!(m.layout("sm").unwrap().is_empty());
    }

    #[test]
    fn narrower_tier_is_derived_and_fixed() {
        let mut m = model();
        for _ in 0..4 {
            m.add_widget(PlacementRequest::new("map")).unwrap();
        }
        let report = m.select_for_width(500.0).unwrap().unwrap();
        assert_eq!(m.active_breakpoint().name, "xs");
        assert_eq!(m.cols(), 4);
        assert!(report.changed());
        assert!(is_overlap_free(m.widgets()));
        assert!(m.widgets().iter().all(|w| w.rect.in_bounds(4)));
        // Identity survives the reflow.
        let lg: Vec<_> = m.layout("lg").unwrap().iter().map(|w| w.id.clone()).collect();
        let xs: Vec<_> = m.widgets().iter().map(|w| w.id.clone()).collect();
        assert_eq!(lg, xs);
        // Selecting an existing tier does not recompute it.
        assert!(m.select_breakpoint("lg").unwrap().is_none());
        assert!(m.select_breakpoint("xs").unwrap().is_none());
    }

    #[test]
    fn new_widgets_reach_every_tier() {
        let mut m = model();
        m.add_widget(PlacementRequest::new("gauge")).unwrap();
        m.select_breakpoint("xxs").unwrap();
        m.select_breakpoint("lg").unwrap();
        let id = m.add_widget(PlacementRequest::new("map")).unwrap();
        let xxs = m.layout("xxs").unwrap();
        let placed = xxs.iter().find(|w| w.id == id).unwrap();
        assert_eq!(placed.size().w, 2);
        assert!(is_overlap_free(xxs));
    }

    #[test]
    fn load_repairs_and_dedupes() {
        let mut m = model();
        let report = m
            .load_layout(
                "lg",
                &raw(r#"[
                    (id: "a", kind: "gauge", x: 0, y: 0, w: 4, h: 4),
                    (id: "a", kind: "gauge", x: 2, y: 2, w: 4, h: 4),
                    (kind: "toggle", x: 0, y: 0),
                ]"#),
            )
            .unwrap();
        let ids: Vec<&str> = report.widgets.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "widget-1", "widget-2"]);
        assert!(is_overlap_free(m.widgets()));
        assert_eq!(m.widget(&WidgetId::new("a")).unwrap().rect, Rect::new(0, 0, 4, 4));
        let next = m.add_widget(PlacementRequest::new("gauge")).unwrap();
        assert_eq!(next.as_str(), "widget-3");
    }

    #[test]
    fn reload_drops_tiers_with_other_widgets() {
        let mut m = model();
        m.load_layout("lg", &raw(r#"[(id: "a", kind: "gauge", x: 0, y: 0, w: 3, h: 3)]"#))
            .unwrap();
        m.select_breakpoint("sm").unwrap();
        m.select_breakpoint("lg").unwrap();
        m.load_layout("lg", &raw(r#"[(id: "b", kind: "gauge", x: 0, y: 0, w: 3, h: 3)]"#))
            .unwrap();
        assert!(m.layout("sm").is_none());

        m.select_breakpoint("sm").unwrap();
        let ids: Vec<&str> = m.widgets().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
        let ghost = WidgetId::new("a");
        assert_eq!(m.remove_widget(&ghost), Err(Error::WidgetNotFound(ghost.clone())));
    }

    #[test]
    fn load_keeps_tiers_with_the_same_widgets() {
        let mut m = model();
        let layout = raw(r#"[(id: "a", kind: "gauge", x: 0, y: 0, w: 3, h: 3)]"#);
        m.load_layout("lg", &layout).unwrap();
        m.load_layout("xs", &raw(r#"[(id: "a", kind: "gauge", x: 1, y: 0, w: 3, h: 3)]"#))
            .unwrap();
        assert_eq!(m.layout("lg").unwrap()[0].rect, Rect::new(0, 0, 3, 3));
        assert_eq!(m.layout("xs").unwrap()[0].rect, Rect::new(1, 0, 3, 3));
    }

    #[test]
    fn load_into_other_tier_rederives_the_active_one() {
        let mut m = model();
        m.add_widget(PlacementRequest::new("gauge")).unwrap();
        m.load_layout("sm", &raw(r#"[(id: "c", kind: "toggle", x: 2, y: 1, w: 2, h: 2)]"#))
            .unwrap();
        assert_eq!(m.active_breakpoint().name, "lg");
        let ids: Vec<&str> = m.widgets().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
        assert_eq!(m.widgets()[0].rect, Rect::new(2, 1, 2, 2));
    }

    #[test]
    fn load_unknown_tier_errors() {
        let mut m = model();
        assert!(matches!(
            m.load_layout("giant", &[]),
            Err(Error::UnknownBreakpoint(name)) if name == "giant"
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = GridConfig::default();
        cfg.row_height = 0;
        assert!(matches!(GridModel::new(cfg), Err(Error::Config(_))));
    }
}
