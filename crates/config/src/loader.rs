//! Parse and load user configuration.

use std::{ffi::OsStr, fs, path::Path};

use tracing::debug;

use crate::{Error, GridConfig, raw::RawGridConfig, resolve_config_path};

/// Parse a RON overlay from `text` and merge it onto the defaults.
pub fn from_ron_str(text: &str) -> Result<GridConfig, Error> {
    let raw: RawGridConfig = ron::from_str(text).map_err(|e| Error::Parse {
        path: None,
        message: e.to_string(),
    })?;
    GridConfig::default().overlay_raw(&raw)
}

/// Load a fully resolved `GridConfig` from a RON file at `path`.
pub fn load_from_path(path: &Path) -> Result<GridConfig, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported config format (expected a .ron file)".to_string(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let cfg = from_ron_str(&text).map_err(|e| e.with_path(path))?;
    debug!(
        path = %path.display(),
        breakpoints = cfg.breakpoints().len(),
        "grid config loaded"
    );
    Ok(cfg)
}

/// Load the configuration selected by [`resolve_config_path`], falling back to
/// the built-in defaults when no file exists.
pub fn load_or_default(explicit: Option<&Path>) -> Result<GridConfig, Error> {
    match resolve_config_path(explicit) {
        Some(path) => load_from_path(&path),
        None => {
            debug!("no grid config file found; using defaults");
            Ok(GridConfig::default())
        }
    }
}
