//! Reading and writing layout files.

use std::{ffi::OsStr, fs, path::Path};

use config::GridConfig;
use grid_engine::{FixReport, GridModel, RawWidget, Widget};
use ron::ser::PrettyConfig;
use tracing::debug;

use crate::error::{Error, Result};

/// Parse a list of raw widgets. `.json` files are read as JSON, everything
/// else as RON.
pub fn read_raw(path: &Path) -> Result<Vec<RawWidget>> {
    let text = fs::read_to_string(path)?;
    let widgets: Vec<RawWidget> = if path.extension() == Some(OsStr::new("json")) {
        serde_json::from_str(&text).map_err(|e| Error::layout(path, e))?
    } else {
        ron::from_str(&text).map_err(|e| Error::layout(path, e))?
    };
    debug!(path = %path.display(), widgets = widgets.len(), "layout read");
    Ok(widgets)
}

/// Build a model with the layout at `path` loaded into `breakpoint` (the
/// widest tier when `None`), which also becomes the active tier.
pub fn load_model(
    cfg: GridConfig,
    path: &Path,
    breakpoint: Option<&str>,
) -> Result<(GridModel, FixReport)> {
    let raw = read_raw(path)?;
    let mut model = GridModel::new(cfg)?;
    let name = breakpoint
        .map(str::to_string)
        .unwrap_or_else(|| model.active_breakpoint().name.clone());
    model.select_breakpoint(&name)?;
    let report = model.load_layout(&name, &raw)?;
    Ok((model, report))
}

/// Render widgets as pretty RON.
pub fn render(widgets: &[Widget]) -> Result<String> {
    ron::ser::to_string_pretty(widgets, PrettyConfig::default())
        .map_err(|e| Error::layout("<stdout>", e))
}

/// Write widgets to `output`, or print them when no path is given.
pub fn emit(widgets: &[Widget], output: Option<&Path>) -> Result<()> {
    let text = render(widgets)?;
    match output {
        Some(path) => {
            fs::write(path, text + "\n")?;
            debug!(path = %path.display(), widgets = widgets.len(), "layout written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, path::PathBuf, process};

    use grid_engine::Rect;

    use super::*;

    fn temp(name: &str, body: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("dashgrid-{}-{name}", process::id()));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn json_and_ron_layouts_load_alike() {
        let json = temp(
            "a.json",
            r#"[{"i": "a", "type": "gauge", "x": 0, "y": 0, "w": 4, "h": 4},
                {"i": "b", "type": "gauge", "x": 2, "y": 2, "w": 4, "h": 4}]"#,
        );
        let ron = temp(
            "a.ron",
            r#"[(id: "a", kind: "gauge", x: 0, y: 0, w: 4, h: 4),
                (id: "b", kind: "gauge", x: 2, y: 2, w: 4, h: 4)]"#,
        );
        let (from_json, report) = load_model(GridConfig::default(), &json, None).unwrap();
        let (from_ron, _) = load_model(GridConfig::default(), &ron, None).unwrap();
        assert_eq!(from_json.widgets(), from_ron.widgets());
        assert_eq!(report.moves.len(), 1);
        assert_eq!(from_json.widgets()[0].rect, Rect::new(0, 0, 4, 4));
        fs::remove_file(json).ok();
        fs::remove_file(ron).ok();
    }

    #[test]
    fn breakpoint_selects_columns() {
        let path = temp("narrow.ron", r#"[(id: "a", x: 3, y: 0, w: 4, h: 1)]"#);
        let (model, _) = load_model(GridConfig::default(), &path, Some("xs")).unwrap();
        assert_eq!(model.cols(), 4);
        assert_eq!(model.widgets()[0].rect, Rect::new(0, 0, 4, 1));
        fs::remove_file(path).ok();
    }

    #[test]
    fn parse_errors_name_the_file() {
        let path = temp("broken.ron", "[(id: ");
        let err = read_raw(&path).unwrap_err();
        assert!(err.to_string().contains("broken.ron"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn rendered_layout_reads_back() {
        let (model, _) = load_model(
            GridConfig::default(),
            &temp("rt.ron", r#"[(id: "a", kind: "map", x: 1, y: 1, w: 6, h: 5)]"#),
            None,
        )
        .unwrap();
        let text = render(model.widgets()).unwrap();
        let back: Vec<Widget> = ron::from_str(&text).unwrap();
        assert_eq!(back, model.widgets());
    }

    #[test]
    fn fixed_output_is_valid_fix_input() {
        let (model, report) = load_model(
            GridConfig::default(),
            &temp(
                "in.ron",
                r#"[(id: "a", kind: "gauge", x: 0, y: 0, w: 4, h: 4),
                    (id: "b", kind: "toggle", x: 1, y: 1, w: 2, h: 2, config: {"on": true})]"#,
            ),
            None,
        )
        .unwrap();
        assert!(report.changed());
        let out = temp("out.ron", &render(model.widgets()).unwrap());
        let (again, report) = load_model(GridConfig::default(), &out, None).unwrap();
        assert!(!report.changed());
        assert_eq!(again.widgets(), model.widgets());
        assert_eq!(again.widgets()[1].config["on"], true);
        fs::remove_file(out).ok();
    }
}
