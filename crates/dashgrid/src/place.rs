//! `place`: add one widget to a layout.

use config::GridConfig;
use grid_engine::{Error as EngineError, PlacementRequest};
use tracing::info;

use crate::{
    cli::PlaceArgs,
    error::{Error, Result},
    layout,
};

/// Load the layout, add the widget, print where it landed and emit the
/// layout.
pub fn run(args: &PlaceArgs, cfg: GridConfig) -> Result<()> {
    let (mut model, _) = layout::load_model(
        cfg,
        &args.input.layout,
        args.input.breakpoint.as_deref(),
    )?;
    let mut req = PlacementRequest::new(args.kind.as_str());
    if let Some(cell) = args.at {
        req = req.at(cell);
    }
    let id = model.add_widget(req)?;
    let widget = model
        .widget(&id)
        .ok_or_else(|| Error::Engine(EngineError::WidgetNotFound(id.clone())))?;
    eprintln!("placed {} ({}) at {}", id, widget.kind, widget.rect);
    info!(%id, rect = %widget.rect, "place complete");
    layout::emit(model.widgets(), args.output.as_deref())
}
