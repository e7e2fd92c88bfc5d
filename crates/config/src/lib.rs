//! Grid configuration (breakpoints, metrics, widget sizes) used by dashgrid.
#![allow(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

use std::{env, path::Path, path::PathBuf};

mod defaults;
mod error;
mod grid;
mod loader;
mod raw;
mod types;

#[cfg(test)]
mod test_merge;
#[cfg(test)]
mod test_parse;

pub use error::Error;
pub use grid::GridConfig;
pub use loader::{from_ron_str, load_from_path, load_or_default};
pub use raw::{Maybe, RawBreakpoint, RawGridConfig, RawSizeSpec};
pub use types::{Breakpoint, SizeSpec, SizeTable, WidgetKind};

/// Determine the preferred user config path (`~/.dashgrid/config.ron`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".dashgrid");
    p.push("config.ron");
    p
}

/// Resolve the effective config path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `~/.dashgrid/config.ron` when it exists.
/// 3) Else `None`: the built-in defaults apply.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let preferred = default_config_path();
    preferred.exists().then_some(preferred)
}
