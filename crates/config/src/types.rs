//! Core configuration data types used in the config crate.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

use serde::{Deserialize, Serialize};

use crate::defaults::{UNKNOWN_SIZE, default_sizes};

/// Widget type tag. The renderer owns what each kind looks like; the grid
/// only cares about the default and minimum footprint of each kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetKind {
    /// Radial gauge.
    Gauge,
    /// Geographic map.
    Map,
    /// On/off switch.
    Toggle,
    /// Time-series line chart.
    LineChart,
    /// Bar chart.
    BarChart,
    /// Tabular readout.
    Table,
    /// Single numeric value.
    Metric,
    /// Free text block.
    Text,
    /// Any kind this engine does not know about.
    Custom(String),
}

impl WidgetKind {
    /// Canonical snake_case name for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gauge => "gauge",
            Self::Map => "map",
            Self::Toggle => "toggle",
            Self::LineChart => "line_chart",
            Self::BarChart => "bar_chart",
            Self::Table => "table",
            Self::Metric => "metric",
            Self::Text => "text",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for WidgetKind {
    fn from(value: &str) -> Self {
        let norm = value.trim().to_ascii_lowercase().replace('-', "_");
        match norm.as_str() {
            "gauge" => Self::Gauge,
            "map" => Self::Map,
            "toggle" | "switch" => Self::Toggle,
            "line_chart" | "linechart" | "chart" => Self::LineChart,
            "bar_chart" | "barchart" => Self::BarChart,
            "table" => Self::Table,
            "metric" | "stat" => Self::Metric,
            "text" => Self::Text,
            _ => Self::Custom(value.trim().to_string()),
        }
    }
}

impl From<String> for WidgetKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<WidgetKind> for String {
    fn from(value: WidgetKind) -> Self {
        value.as_str().to_string()
    }
}

impl Display for WidgetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Default footprint and size bounds for a widget kind, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSpec {
    /// Default width.
    pub w: u32,
    /// Default height.
    pub h: u32,
    /// Minimum width.
    pub min_w: u32,
    /// Minimum height.
    pub min_h: u32,
    /// Maximum width; `None` means the breakpoint's column count.
    #[serde(default)]
    pub max_w: Option<u32>,
    /// Maximum height; `None` means the configured row ceiling.
    #[serde(default)]
    pub max_h: Option<u32>,
}

impl SizeSpec {
    /// Construct a size spec without explicit maxima.
    pub const fn new(w: u32, h: u32, min_w: u32, min_h: u32) -> Self {
        Self {
            w,
            h,
            min_w,
            min_h,
            max_w: None,
            max_h: None,
        }
    }

    /// Describe the first inconsistency in this spec, if any.
    pub(crate) fn problem(&self) -> Option<String> {
        if self.w == 0 || self.h == 0 {
            return Some(format!("size {}x{} must be positive", self.w, self.h));
        }
        if self.min_w == 0 || self.min_h == 0 {
            return Some(format!(
                "minimum size {}x{} must be positive",
                self.min_w, self.min_h
            ));
        }
        if self.min_w > self.w || self.min_h > self.h {
            return Some(format!(
                "minimum size {}x{} exceeds default size {}x{}",
                self.min_w, self.min_h, self.w, self.h
            ));
        }
        match (self.max_w, self.max_h) {
            (Some(mw), _) if mw < self.w => {
                Some(format!("max_w {} is below default width {}", mw, self.w))
            }
            (_, Some(mh)) if mh < self.h => {
                Some(format!("max_h {} is below default height {}", mh, self.h))
            }
            _ => None,
        }
    }
}

/// Named viewport tier with its own column count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Tier name used to key per-breakpoint layouts (e.g. `lg`).
    pub name: String,
    /// Smallest container width (px) that selects this tier.
    pub min_width: u32,
    /// Number of grid columns in this tier.
    pub cols: u32,
}

impl Breakpoint {
    /// Construct a breakpoint.
    pub fn new(name: impl Into<String>, min_width: u32, cols: u32) -> Self {
        Self {
            name: name.into(),
            min_width,
            cols,
        }
    }
}

/// Per-kind size table with a fixed fallback for unknown kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeTable(BTreeMap<WidgetKind, SizeSpec>);

impl Default for SizeTable {
    fn default() -> Self {
        Self(default_sizes().into_iter().collect())
    }
}

impl SizeTable {
    /// Size for `kind`; kinds without an entry get a 3x3 footprint.
    pub fn size_for(&self, kind: &WidgetKind) -> SizeSpec {
        self.0.get(kind).copied().unwrap_or(UNKNOWN_SIZE)
    }

    /// Whether the table has an explicit entry for `kind`.
    pub fn contains(&self, kind: &WidgetKind) -> bool {
        self.0.contains_key(kind)
    }

    /// Insert or replace the entry for `kind`.
    pub fn insert(&mut self, kind: WidgetKind, spec: SizeSpec) {
        self.0.insert(kind, spec);
    }

    /// Iterate over all explicit entries.
    pub fn iter(&self) -> impl Iterator<Item = (&WidgetKind, &SizeSpec)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_normalized() {
        assert_eq!(WidgetKind::from("Gauge"), WidgetKind::Gauge);
        assert_eq!(WidgetKind::from("line-chart"), WidgetKind::LineChart);
        assert_eq!(WidgetKind::from(" switch "), WidgetKind::Toggle);
        assert_eq!(
            WidgetKind::from("Sparkline"),
            WidgetKind::Custom("Sparkline".to_string())
        );
        assert_eq!(String::from(WidgetKind::BarChart), "bar_chart");
    }

    #[test]
    fn unknown_kinds_fall_back_to_three_by_three() {
        let table = SizeTable::default();
        let spec = table.size_for(&WidgetKind::from("radar"));
        assert_eq!((spec.w, spec.h), (3, 3));
        assert!(!table.contains(&WidgetKind::from("radar")));
    }

    #[test]
    fn builtin_sizes_match_catalogue() {
        let table = SizeTable::default();
        assert_eq!(table.size_for(&WidgetKind::Gauge), SizeSpec::new(3, 3, 2, 2));
        assert_eq!(table.size_for(&WidgetKind::Map), SizeSpec::new(6, 5, 4, 4));
        assert_eq!(table.size_for(&WidgetKind::Toggle), SizeSpec::new(2, 2, 2, 2));
        for (kind, spec) in table.iter() {
            assert!(spec.problem().is_none(), "{kind}: {:?}", spec.problem());
        }
    }

    #[test]
    fn size_problems_are_reported() {
        assert!(SizeSpec::new(0, 3, 1, 1).problem().is_some());
        assert!(SizeSpec::new(3, 3, 4, 1).problem().is_some());
        let mut spec = SizeSpec::new(3, 3, 1, 1);
        spec.max_h = Some(2);
        assert!(spec.problem().is_some());
    }
}
