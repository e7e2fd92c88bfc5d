//! Shared identifiers for dashboard widgets.
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

use std::{
    borrow::Borrow,
    fmt::{Display, Formatter, Result as FmtResult},
};

use serde::{Deserialize, Serialize};

/// Prefix used for identifiers minted by the grid model.
pub const GENERATED_PREFIX: &str = "widget-";

/// Stable identifier for a widget placed on the dashboard grid.
///
/// Identifiers are opaque strings. They are supplied by the persistence layer
/// for loaded layouts and minted as `widget-<n>` for widgets created through a
/// placement request. The identifier never changes when a widget is moved,
/// resized, or re-flowed into a different breakpoint.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Construct an identifier from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint the identifier for the `n`th generated widget.
    #[must_use]
    pub fn generated(n: u64) -> Self {
        Self(format!("{GENERATED_PREFIX}{n}"))
    }

    /// Sequence number when this id was produced by [`WidgetId::generated`].
    #[must_use]
    pub fn generated_index(&self) -> Option<u64> {
        self.0.strip_prefix(GENERATED_PREFIX)?.parse().ok()
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WidgetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for WidgetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<WidgetId> for String {
    fn from(value: WidgetId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_round_trip_their_index() {
        let id = WidgetId::generated(42);
        assert_eq!(id.as_str(), "widget-42");
        assert_eq!(id.generated_index(), Some(42));
        assert_eq!(WidgetId::new("gauge-main").generated_index(), None);
        assert_eq!(WidgetId::new("widget-abc").generated_index(), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = WidgetId::from("temp-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"temp-1\"");
        let back: WidgetId = serde_json::from_str("\"temp-1\"").unwrap();
        assert_eq!(back, id);
    }
}
