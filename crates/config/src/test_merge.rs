#[cfg(test)]
mod tests {
    use crate::{GridConfig, RawGridConfig, WidgetKind};

    #[test]
    fn overlay_keeps_unset_size_fields() {
        let base = GridConfig::default();

        // User widens the map but leaves its minimums alone.
        let user_overlay =
            ron::from_str::<RawGridConfig>("(sizes: {\"map\": (w: 8, max_w: 10)})").unwrap();

        let merged = base.clone().overlay_raw(&user_overlay).unwrap();
        let map = merged.size_for(&WidgetKind::Map);

        assert_eq!(map.w, 8);
        assert_eq!(map.max_w, Some(10));
        assert_eq!(map.min_w, base.size_for(&WidgetKind::Map).min_w);
        // Other kinds are untouched.
        assert_eq!(
            merged.size_for(&WidgetKind::Gauge),
            base.size_for(&WidgetKind::Gauge)
        );
    }

    #[test]
    fn overlay_is_applied_in_order() {
        let first = ron::from_str::<RawGridConfig>("(margin_x: 4, margin_y: 4)").unwrap();
        let second = ron::from_str::<RawGridConfig>("(margin_y: 10)").unwrap();

        let merged = GridConfig::default()
            .overlay_raw(&first)
            .and_then(|cfg| cfg.overlay_raw(&second))
            .unwrap();

        assert_eq!(merged.margin_x, 4);
        assert_eq!(merged.margin_y, 10);
    }
}
