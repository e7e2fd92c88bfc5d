//! `check`: report overlaps without repairing.

use config::GridConfig;
use grid_engine::{
    Error as EngineError, Overlap, RawWidget, Widget, normalize::normalize_widget, validate_all,
};
use widget_ids::WidgetId;

use crate::{
    cli::CheckArgs,
    error::{Error, Result},
    layout,
};

/// Normalize `raw` for `cols` columns without repairing overlaps.
fn normalize_all(raw: &[RawWidget], cols: u32, cfg: &GridConfig) -> Vec<Widget> {
    let mut next = 0u64;
    raw.iter()
        .map(|r| {
            normalize_widget(r, cols, cfg, || {
                next += 1;
                WidgetId::generated(next)
            })
        })
        .collect()
}

/// Overlapping pairs in a raw layout after normalization.
pub fn overlaps(raw: &[RawWidget], cols: u32, cfg: &GridConfig) -> Vec<Overlap> {
    validate_all(&normalize_all(raw, cols, cfg))
}

/// Print every overlap; fail when there are any.
pub fn run(args: &CheckArgs, cfg: &GridConfig) -> Result<()> {
    let raw = layout::read_raw(&args.input.layout)?;
    let cols = match args.input.breakpoint.as_deref() {
        Some(name) => {
            cfg.breakpoint(name)
                .ok_or_else(|| EngineError::UnknownBreakpoint(name.to_string()))?
                .cols
        }
        None => cfg.largest().cols,
    };
    let found = overlaps(&raw, cols, cfg);
    for o in &found {
        println!("{o}");
    }
    if found.is_empty() {
        println!("ok: {} widgets, no overlaps", raw.len());
        Ok(())
    } else {
        Err(Error::OverlapsFound(found.len()))
    }
}
