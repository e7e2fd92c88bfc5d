//! `fix`: normalize and repair a layout.

use config::GridConfig;
use tracing::info;

use crate::{cli::FixArgs, error::Result, layout};

/// Load, repair and emit the layout, printing each move to stderr.
pub fn run(args: &FixArgs, cfg: GridConfig) -> Result<()> {
    let (model, report) = layout::load_model(
        cfg,
        &args.input.layout,
        args.input.breakpoint.as_deref(),
    )?;
    for mv in &report.moves {
        eprintln!("moved {}: {} -> {}", mv.id, mv.from, mv.to);
    }
    info!(
        breakpoint = %model.active_breakpoint().name,
        widgets = model.widgets().len(),
        moved = report.moves.len(),
        "fix complete"
    );
    layout::emit(model.widgets(), args.output.as_deref())
}
