use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Breakpoint, Error, GridConfig, SizeSpec, WidgetKind};

// ===== OPTIONAL FIELD WRAPPER =====

/// Optional field in hand-written RON or JSON.
///
/// An omitted field, `()` or `null` reads as absent. A bare value such as
/// `row_height: 96` reads as present, and so does `Some(96)`. Plain
/// `Option<T>` would reject the bare form in RON.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Maybe<T> {
    Unit(()),
    Value(T),
    Opt(Option<T>),
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::Unit(())
    }
}

impl<T> From<T> for Maybe<T> {
    fn from(v: T) -> Self {
        Self::Value(v)
    }
}

impl<T> Maybe<T> {
    /// Borrowed value, if present.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Unit(()) | Self::Opt(None) => None,
            Self::Value(v) | Self::Opt(Some(v)) => Some(v),
        }
    }
}

impl<T: Copy> Maybe<T> {
    /// Copied value, if present.
    pub fn get(&self) -> Option<T> {
        self.as_option().copied()
    }
}

// ===== RAW BREAKPOINT =====

/// Breakpoint as written by the user. Columns are signed so that a negative
/// value surfaces as a validation error instead of an opaque parse failure.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawBreakpoint {
    pub name: String,
    #[serde(default)]
    pub min_width: u32,
    pub cols: i64,
}

impl RawBreakpoint {
    fn resolve(&self) -> Result<Breakpoint, Error> {
        let cols = u32::try_from(self.cols)
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| {
                Error::invalid(format!(
                    "breakpoint '{}' must have a positive column count (got {})",
                    self.name, self.cols
                ))
            })?;
        Ok(Breakpoint::new(self.name.clone(), self.min_width, cols))
    }
}

// ===== RAW SIZE SPEC =====

/// Partial size entry merged over the built-in entry for the same kind.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawSizeSpec {
    #[serde(default)]
    pub w: Maybe<u32>,
    #[serde(default)]
    pub h: Maybe<u32>,
    #[serde(default)]
    pub min_w: Maybe<u32>,
    #[serde(default)]
    pub min_h: Maybe<u32>,
    #[serde(default)]
    pub max_w: Maybe<u32>,
    #[serde(default)]
    pub max_h: Maybe<u32>,
}

impl RawSizeSpec {
    fn overlay(&self, base: SizeSpec) -> SizeSpec {
        SizeSpec {
            w: self.w.get().unwrap_or(base.w),
            h: self.h.get().unwrap_or(base.h),
            min_w: self.min_w.get().unwrap_or(base.min_w),
            min_h: self.min_h.get().unwrap_or(base.min_h),
            max_w: self.max_w.get().or(base.max_w),
            max_h: self.max_h.get().or(base.max_h),
        }
    }
}

// ===== RAW GRID CONFIG =====

/// User configuration overlay; every omitted field keeps its default.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawGridConfig {
    /// Replaces the whole breakpoint list when present.
    #[serde(default)]
    pub breakpoints: Maybe<Vec<RawBreakpoint>>,
    #[serde(default)]
    pub row_height: Maybe<u32>,
    #[serde(default)]
    pub margin_x: Maybe<u32>,
    #[serde(default)]
    pub margin_y: Maybe<u32>,
    #[serde(default)]
    pub anchor_limit: Maybe<usize>,
    #[serde(default)]
    pub search_radius: Maybe<u32>,
    #[serde(default)]
    pub fallback_gap: Maybe<u32>,
    #[serde(default)]
    pub max_widget_rows: Maybe<u32>,
    /// Per-kind entries merged over the built-in table.
    #[serde(default)]
    pub sizes: Maybe<BTreeMap<WidgetKind, RawSizeSpec>>,
}

impl GridConfig {
    /// Merge a raw overlay onto this configuration and validate the result.
    pub fn overlay_raw(mut self, raw: &RawGridConfig) -> Result<Self, Error> {
        if let Some(bps) = raw.breakpoints.as_option() {
            let resolved = bps
                .iter()
                .map(RawBreakpoint::resolve)
                .collect::<Result<Vec<_>, _>>()?;
            self.set_breakpoints(resolved)?;
        }
        if let Some(v) = raw.row_height.get() {
            self.row_height = v;
        }
        if let Some(v) = raw.margin_x.get() {
            self.margin_x = v;
        }
        if let Some(v) = raw.margin_y.get() {
            self.margin_y = v;
        }
        if let Some(v) = raw.anchor_limit.get() {
            self.anchor_limit = v;
        }
        if let Some(v) = raw.search_radius.get() {
            self.search_radius = v;
        }
        if let Some(v) = raw.fallback_gap.get() {
            self.fallback_gap = v;
        }
        if let Some(v) = raw.max_widget_rows.get() {
            self.max_widget_rows = v;
        }
        if let Some(sizes) = raw.sizes.as_option() {
            for (kind, spec) in sizes {
                let base = self.sizes.size_for(kind);
                self.sizes.insert(kind.clone(), spec.overlay(base));
            }
        }
        self.validate()?;
        Ok(self)
    }
}
