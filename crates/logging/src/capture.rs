//! In-memory capture of tracing events.
//!
//! The engine reports recoverable input problems (for example a widget whose
//! minimum width exceeds its width) as log diagnostics rather than errors.
//! This layer records rendered events so callers, mostly tests, can assert
//! that such diagnostics were emitted.
//!
//! Usage:
//! - Call [`capture`] with a closure; every event emitted on the current
//!   thread while it runs is recorded.
//! - Or install [`layer`] in your own subscriber and keep the [`Captured`]
//!   handle it returns.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Event, Subscriber, subscriber};
use tracing_subscriber::{
    layer::{Context, Layer},
    prelude::*,
    registry,
};

use crate::fmt::{RenderedLog, render_event};

/// Shared handle to the captured events.
#[derive(Debug, Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<RenderedLog>>>);

impl Captured {
    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<RenderedLog> {
        self.0.lock().clone()
    }

    /// True if any event at `level` (e.g. "WARN") contains `needle`.
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.0
            .lock()
            .iter()
            .any(|e| e.level.eq_ignore_ascii_case(level) && e.message.contains(needle))
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

/// Tracing layer that appends every event to a [`Captured`] buffer.
pub struct CaptureLayer {
    /// Destination buffer.
    sink: Captured,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.sink.0.lock().push(render_event(event));
    }
}

/// Create a capture layer and the handle used to read what it records.
pub fn layer() -> (CaptureLayer, Captured) {
    let sink = Captured::default();
    (CaptureLayer { sink: sink.clone() }, sink)
}

/// Run `f` with a thread-local subscriber that records every event.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Captured) {
    let (layer, captured) = layer();
    let out = subscriber::with_default(registry().with(layer), f);
    (out, captured)
}
