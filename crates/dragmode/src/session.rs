use std::fmt::{Display, Formatter, Result as FmtResult};

use config::WidgetKind;
use grid_engine::{
    Cell, Displacement, Error as EngineError, FixReport, GridModel, PlacementRequest, Rect, Size,
    SizeBounds, collision::is_free, place::nearest_free,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use widget_ids::WidgetId;

use crate::DragError;

/// Lifecycle of a drag session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// Drag started; no move event yet.
    Active,
    /// At least one move event processed.
    Over,
    /// Last session ended with a drop that mutated the model.
    Committed,
    /// Last session ended without a drop.
    Cancelled,
}

impl DragPhase {
    /// True while a session is open.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active | Self::Over)
    }
}

impl Display for DragPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            Self::Idle => "idle",
            Self::Active => "drag_active",
            Self::Over => "drag_over",
            Self::Committed => "drop_committed",
            Self::Cancelled => "drag_cancelled",
        };
        f.write_str(s)
    }
}

/// What is being dragged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragSource {
    /// A widget of `kind` from the palette, not yet on the grid.
    New {
        /// Kind of widget to create on drop.
        kind: WidgetKind,
    },
    /// A widget already on the grid.
    Existing {
        /// Widget being moved.
        id: WidgetId,
    },
}

impl DragSource {
    fn existing_id(&self) -> Option<&WidgetId> {
        match self {
            Self::Existing { id } => Some(id),
            Self::New { .. } => None,
        }
    }
}

/// Pointer position inside the grid container, with the container's live
/// width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Horizontal offset inside the container, in pixels.
    pub x: f64,
    /// Vertical offset inside the container, in pixels.
    pub y: f64,
    /// Live container width, in pixels.
    pub container_width: f64,
}

impl PointerEvent {
    /// Pointer at (`x`, `y`) in a container `container_width` wide.
    pub fn new(x: f64, y: f64, container_width: f64) -> Self {
        Self {
            x,
            y,
            container_width,
        }
    }
}

/// Pure preview of where a drop at the current pointer would land.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DragPreview {
    /// Quantized pointer cell.
    pub cell: Cell,
    /// Footprint of the dragged widget at `cell`.
    pub rect: Rect,
    /// True if `rect` is in bounds and overlaps nothing.
    pub target_free: bool,
    /// Where the widget would actually be committed. Equal to `cell` for
    /// existing widgets; the nearest free cell for new ones.
    pub landing: Cell,
    /// Widgets an existing widget would push out of the way.
    pub displaced: Vec<Displacement>,
}

/// Result of a committed drop.
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// A palette widget was created.
    Added {
        /// Id of the new widget.
        id: WidgetId,
        /// Cell it landed on.
        cell: Cell,
    },
    /// An existing widget was moved; `report` lists every widget that moved.
    Moved {
        /// Widget that was dropped.
        id: WidgetId,
        /// Every widget that moved, the dropped one included.
        report: FixReport,
    },
}

/// Response to a session event.
#[derive(Clone, Debug, PartialEq)]
pub enum DragResponse {
    /// The event does not apply in the current phase.
    Ignored,
    /// A session opened.
    Started {
        /// What is being dragged.
        source: DragSource,
        /// Footprint used for quantizing and previews.
        size: Size,
    },
    /// Fresh preview for a new pointer cell.
    Preview(DragPreview),
    /// The pointer cell did not change; the previous preview still holds.
    Unchanged,
    /// The drop was committed to the model.
    Committed(DropOutcome),
    /// The session was discarded.
    Cancelled,
}

/// Open session state.
#[derive(Clone, Debug)]
struct ActiveDrag {
    source: DragSource,
    size: Size,
    last_cell: Option<Cell>,
    preview: Option<DragPreview>,
}

/// One drag session at a time. Events outside an open session are ignored.
#[derive(Debug, Default)]
pub struct DragSession {
    phase: DragPhase,
    drag: Option<ActiveDrag>,
}

impl DragSession {
    /// Idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// True while a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Latest preview of the open session.
    pub fn preview(&self) -> Option<&DragPreview> {
        self.drag.as_ref().and_then(|d| d.preview.as_ref())
    }

    /// What the open session is dragging.
    pub fn source(&self) -> Option<&DragSource> {
        self.drag.as_ref().map(|d| &d.source)
    }

    /// Open a session. Ignored if one is already open.
    pub fn start(
        &mut self,
        model: &GridModel,
        source: DragSource,
    ) -> Result<DragResponse, DragError> {
        if self.is_active() {
            warn!(phase = %self.phase, "drag: session already open; ignoring start");
            return Ok(DragResponse::Ignored);
        }
        let size = match &source {
            DragSource::New { kind } => {
                let cfg = model.config();
                let spec = cfg.size_for(kind);
                SizeBounds::from_spec(&spec, model.cols(), cfg.max_widget_rows)
                    .clamp(Size::new(spec.w, spec.h))
            }
            DragSource::Existing { id } => model
                .widget(id)
                .map(|w| w.size())
                .ok_or_else(|| EngineError::WidgetNotFound(id.clone()))?,
        };
        debug!(?source, %size, "drag: start");
        self.drag = Some(ActiveDrag {
            source: source.clone(),
            size,
            last_cell: None,
            preview: None,
        });
        self.phase = DragPhase::Active;
        Ok(DragResponse::Started { source, size })
    }

    /// Process a move event. Recomputes the preview only when the quantized
    /// cell changes.
    pub fn over(
        &mut self,
        model: &GridModel,
        ev: PointerEvent,
    ) -> Result<DragResponse, DragError> {
        if !self.is_active() {
            trace!(phase = %self.phase, "drag: over outside a session");
            return Ok(DragResponse::Ignored);
        }
        let Some(drag) = self.drag.as_mut() else {
            return Ok(DragResponse::Ignored);
        };
        let cell = model
            .metrics()
            .pointer_to_cell(ev.x, ev.y, ev.container_width, drag.size.w);
        if drag.last_cell == Some(cell) {
            self.phase = DragPhase::Over;
            return Ok(DragResponse::Unchanged);
        }
        let vanished = drag
            .source
            .existing_id()
            .filter(|id| model.widget(id).is_none())
            .cloned();
        if let Some(id) = vanished {
            self.abort();
            return Err(DragError::WidgetVanished(id));
        }
        let preview = compute_preview(model, &drag.source, drag.size, cell);
        trace!(cell = %cell, free = preview.target_free, displaced = preview.displaced.len(), "drag: preview");
        drag.last_cell = Some(cell);
        drag.preview = Some(preview.clone());
        self.phase = DragPhase::Over;
        Ok(DragResponse::Preview(preview))
    }

    /// Commit the session at the pointer position.
    pub fn drop(
        &mut self,
        model: &mut GridModel,
        ev: PointerEvent,
    ) -> Result<DragResponse, DragError> {
        if !self.is_active() {
            trace!(phase = %self.phase, "drag: drop outside a session");
            return Ok(DragResponse::Ignored);
        }
        let Some(drag) = self.drag.take() else {
            return Ok(DragResponse::Ignored);
        };
        let cell = model
            .metrics()
            .pointer_to_cell(ev.x, ev.y, ev.container_width, drag.size.w);
        let outcome = match commit(model, drag.source, drag.size, cell) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.phase = DragPhase::Cancelled;
                return Err(e);
            }
        };
        debug!(cell = %cell, "drag: committed");
        self.phase = DragPhase::Committed;
        Ok(DragResponse::Committed(outcome))
    }

    /// End the session without a drop. The model is untouched.
    pub fn cancel(&mut self) -> DragResponse {
        if !self.is_active() {
            return DragResponse::Ignored;
        }
        debug!("drag: cancelled");
        self.abort();
        DragResponse::Cancelled
    }

    fn abort(&mut self) {
        self.drag = None;
        self.phase = DragPhase::Cancelled;
    }
}

/// Preview for a drag of `size` from `source` at `cell`.
fn compute_preview(model: &GridModel, source: &DragSource, size: Size, cell: Cell) -> DragPreview {
    let rect = Rect::from_parts(cell, size);
    let cols = model.cols();
    match source.existing_id() {
        Some(id) => {
            let target_free = is_free(&rect, &model.occupied_except(id), cols);
            let displaced = if target_free {
                Vec::new()
            } else {
                model.preview_move(Some(id), rect)
            };
            DragPreview {
                cell,
                rect,
                target_free,
                landing: cell,
                displaced,
            }
        }
        None => {
            let occupied: Vec<Rect> = model.widgets().iter().map(|w| w.rect).collect();
            let target_free = is_free(&rect, &occupied, cols);
            let landing = if target_free {
                cell
            } else {
                nearest_free(&occupied, cell, size, cols, model.config().search_radius)
            };
            DragPreview {
                cell,
                rect,
                target_free,
                landing,
                displaced: Vec::new(),
            }
        }
    }
}

/// Apply a drop to the model.
fn commit(
    model: &mut GridModel,
    source: DragSource,
    size: Size,
    cell: Cell,
) -> Result<DropOutcome, DragError> {
    match source {
        DragSource::New { kind } => {
            let req = PlacementRequest::new(kind)
                .with_size(size.w, size.h)
                .at(cell);
            let id = model.add_widget(req)?;
            let cell = model
                .widget(&id)
                .map(|w| w.cell())
                .ok_or_else(|| DragError::WidgetVanished(id.clone()))?;
            Ok(DropOutcome::Added { id, cell })
        }
        DragSource::Existing { id } => {
            if model.widget(&id).is_none() {
                return Err(DragError::WidgetVanished(id));
            }
            let report = model.move_widget(&id, cell)?;
            Ok(DropOutcome::Moved { id, report })
        }
    }
}
