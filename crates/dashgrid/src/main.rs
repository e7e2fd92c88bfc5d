#![warn(missing_docs)]

//! Entry point for the `dashgrid` binary.

mod check;
mod cli;
mod drag;
mod error;
mod fix;
mod layout;
mod place;

use std::{io, process};

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, load configuration and dispatch to
/// the chosen subcommand.
fn run() -> Result<()> {
    let Cli {
        log,
        config_path,
        command,
    } = Cli::parse();
    let env_filter = logging::env_filter_from_spec(&log.spec());
    registry()
        .with(env_filter)
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();

    let cfg = config::load_or_default(config_path.as_deref())?;
    match command {
        Commands::Fix(args) => fix::run(&args, cfg),
        Commands::Check(args) => check::run(&args, &cfg),
        Commands::Place(args) => place::run(&args, cfg),
        Commands::Drag(args) => drag::run(&args, cfg),
    }
}
