//! `drag`: replay a scripted drag session.

use std::{fs, path::Path, result::Result as StdResult};

use config::{GridConfig, WidgetKind};
use dragmode::{DragResponse, DragSession, DragSource, DropOutcome, PointerEvent};
use serde::Deserialize;
use tracing::{debug, info};
use widget_ids::WidgetId;

use crate::{
    cli::DragArgs,
    error::{Error, Result},
    layout,
};

/// What a scripted `start` picks up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Pickup {
    /// A palette widget of this kind.
    New(String),
    /// A widget already in the layout.
    Existing(String),
}

impl From<Pickup> for DragSource {
    fn from(p: Pickup) -> Self {
        match p {
            Pickup::New(kind) => Self::New {
                kind: WidgetKind::from(kind),
            },
            Pickup::Existing(id) => Self::Existing {
                id: WidgetId::new(id),
            },
        }
    }
}

/// One scripted input event. Pointer steps carry `(x, y, container_width)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    /// Open a session.
    Start(Pickup),
    /// Pointer moved.
    Over(f64, f64, f64),
    /// Pointer released over the grid.
    Drop(f64, f64, f64),
    /// Drag ended outside the grid.
    Cancel,
}

/// Parse a RON list of steps.
fn parse_script(text: &str) -> StdResult<Vec<Step>, String> {
    ron::from_str(text).map_err(|e| e.to_string())
}

/// Read and parse the script at `path`.
fn read_script(path: &Path) -> Result<Vec<Step>> {
    let text = fs::read_to_string(path)?;
    parse_script(&text).map_err(|e| Error::layout(path, e))
}

/// One-line summary of a response.
fn describe(resp: &DragResponse) -> String {
    match resp {
        DragResponse::Ignored => "ignored".to_string(),
        DragResponse::Started { source, size } => format!("started {source:?} size {size}"),
        DragResponse::Preview(p) => {
            let mut s = format!(
                "preview cell {} free={} landing {}",
                p.cell, p.target_free, p.landing
            );
            for d in &p.displaced {
                s.push_str(&format!("; push {} {} -> {}", d.id, d.from, d.to));
            }
            s
        }
        DragResponse::Unchanged => "unchanged".to_string(),
        DragResponse::Committed(DropOutcome::Added { id, cell }) => {
            format!("committed: added {id} at {cell}")
        }
        DragResponse::Committed(DropOutcome::Moved { id, report }) => {
            format!("committed: moved {id}, {} widget(s) moved", report.moves.len())
        }
        DragResponse::Cancelled => "cancelled".to_string(),
    }
}

/// Replay every step, printing each response, then emit the layout.
pub fn run(args: &DragArgs, cfg: GridConfig) -> Result<()> {
    let steps = read_script(&args.script)?;
    let (mut model, _) = layout::load_model(
        cfg,
        &args.input.layout,
        args.input.breakpoint.as_deref(),
    )?;
    let mut session = DragSession::new();
    for (i, step) in steps.into_iter().enumerate() {
        debug!(step = i + 1, ?step, "drag script step");
        let resp = match step {
            Step::Start(p) => session.start(&model, p.into())?,
            Step::Over(x, y, w) => session.over(&model, PointerEvent::new(x, y, w))?,
            Step::Drop(x, y, w) => session.drop(&mut model, PointerEvent::new(x, y, w))?,
            Step::Cancel => session.cancel(),
        };
        eprintln!("{:>3}: {}", i + 1, describe(&resp));
    }
    info!(phase = %session.phase(), widgets = model.widgets().len(), "drag replay complete");
    layout::emit(model.widgets(), args.output.as_deref())
}
