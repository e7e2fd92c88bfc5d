//! Command-line interface definitions for dashgrid.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use grid_engine::Cell;
use logging::LogArgs;

/// Command-line interface for the `dashgrid` binary.
#[derive(Parser, Debug)]
#[command(
    name = "dashgrid",
    about = "Place, repair and drag widgets on a dashboard grid",
    version
)]
pub struct Cli {
    /// Logging controls.
    #[command(flatten)]
    pub log: LogArgs,

    /// Grid configuration file (RON). Defaults to ~/.dashgrid/config.ron when present.
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize and repair a layout, printing every move.
    Fix(FixArgs),
    /// Report overlaps in a layout without repairing it.
    Check(CheckArgs),
    /// Add a widget to a layout and report where it landed.
    Place(PlaceArgs),
    /// Replay a scripted drag session against a layout.
    Drag(DragArgs),
}

/// Options shared by every command that reads a layout.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Layout file: a RON or JSON (by extension) list of widgets.
    #[arg(value_name = "LAYOUT")]
    pub layout: PathBuf,

    /// Breakpoint the layout belongs to. Defaults to the widest tier.
    #[arg(long, value_name = "NAME")]
    pub breakpoint: Option<String>,
}

/// Arguments for the `fix` subcommand.
#[derive(Args, Debug, Clone)]
pub struct FixArgs {
    #[command(flatten)]
    pub input: LayoutArgs,

    /// Write the repaired layout here instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: LayoutArgs,
}

/// Arguments for the `place` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PlaceArgs {
    #[command(flatten)]
    pub input: LayoutArgs,

    /// Widget kind, e.g. gauge, map, toggle.
    #[arg(long, value_name = "KIND")]
    pub kind: String,

    /// Target cell as X,Y. The first free cell is used when omitted.
    #[arg(long, value_name = "X,Y", value_parser = parse_cell)]
    pub at: Option<Cell>,

    /// Write the resulting layout here instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `drag` subcommand.
#[derive(Args, Debug, Clone)]
pub struct DragArgs {
    #[command(flatten)]
    pub input: LayoutArgs,

    /// RON list of drag events, e.g. `[start(new("gauge")), over(120.0, 40.0, 1216.0), drop(120.0, 40.0, 1216.0)]`.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Write the resulting layout here instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Parse `X,Y` into a cell.
pub fn parse_cell(s: &str) -> Result<Cell, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|e| format!("bad column '{x}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad row '{y}': {e}"))?;
    Ok(Cell::new(x, y))
}
