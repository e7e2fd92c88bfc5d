#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, process};

    use crate::{Error, GridConfig, SizeSpec, WidgetKind, from_ron_str, load_from_path};

    fn temp_path(name: &str) -> PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("dashgrid-config-{}-{}", process::id(), name));
        p
    }

    #[test]
    fn empty_overlay_yields_defaults() {
        let cfg = from_ron_str("()").unwrap();
        assert_eq!(cfg, GridConfig::default());
        assert_eq!(cfg.row_height, 80);
        assert_eq!(cfg.margin_x, 16);
        assert_eq!(cfg.largest().cols, 12);
    }

    #[test]
    fn overlay_scalars_and_sizes() {
        let cfg = from_ron_str(
            r#"(
                row_height: 60,
                search_radius: 5,
                sizes: {
                    "gauge": (w: 4, h: 4),
                    "sparkline": (w: 3, h: 1, min_w: 2, min_h: 1),
                },
            )"#,
        )
        .unwrap();
        assert_eq!(cfg.row_height, 60);
        assert_eq!(cfg.search_radius, 5);
        // Unset fields keep their built-in values.
        assert_eq!(cfg.margin_y, 16);
        let gauge = cfg.size_for(&WidgetKind::Gauge);
        assert_eq!((gauge.w, gauge.h, gauge.min_w, gauge.min_h), (4, 4, 2, 2));
        assert_eq!(
            cfg.size_for(&WidgetKind::from("sparkline")),
            SizeSpec::new(3, 1, 2, 1)
        );
    }

    #[test]
    fn overlay_fields_accept_some_and_unit() {
        let cfg = from_ron_str(
            r#"(
                row_height: Some(96),
                margin_x: (),
                margin_y: None,
                sizes: Some({"map": (w: 8, max_w: Some(10))}),
            )"#,
        )
        .unwrap();
        assert_eq!(cfg.row_height, 96);
        assert_eq!(cfg.margin_x, 16);
        assert_eq!(cfg.margin_y, 16);
        let map = cfg.size_for(&WidgetKind::Map);
        assert_eq!((map.w, map.max_w), (8, Some(10)));
    }

    #[test]
    fn overlay_replaces_breakpoints() {
        let cfg = from_ron_str(
            r#"(breakpoints: [
                (name: "desk", min_width: 900, cols: 8),
                (name: "phone", cols: 1),
            ])"#,
        )
        .unwrap();
        assert_eq!(cfg.breakpoints().len(), 2);
        assert_eq!(cfg.breakpoint_for_width(1000.0).name, "desk");
        assert_eq!(cfg.breakpoint_for_width(10.0).cols, 1);
    }

    #[test]
    fn non_positive_columns_fail_validation() {
        for cols in ["0", "-3"] {
            let text = format!("(breakpoints: [(name: \"lg\", min_width: 0, cols: {cols})])");
            let err = from_ron_str(&text).unwrap_err();
            assert!(matches!(err, Error::Validation { .. }), "{err:?}");
            assert!(err.pretty().contains("positive column count"));
        }
    }

    #[test]
    fn inconsistent_size_entry_fails_validation() {
        let err = from_ron_str(r#"(sizes: {"toggle": (min_w: 5)})"#).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("toggle"));
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        let err = from_ron_str("(row_height: )").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        let err = from_ron_str("(no_such_field: 1)").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn load_from_path_attaches_path() {
        let path = temp_path("bad.ron");
        fs::write(&path, "(row_height: 0)").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(err.pretty().contains("row_height"));
        fs::remove_file(&path).ok();

        let good = temp_path("good.ron");
        fs::write(&good, "(margin_x: 8)").unwrap();
        assert_eq!(load_from_path(&good).unwrap().margin_x, 8);
        fs::remove_file(&good).ok();
    }

    #[test]
    fn load_from_path_rejects_other_extensions() {
        let err = load_from_path(&temp_path("config.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
