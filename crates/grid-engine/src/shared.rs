//! Thread-safe handle to a [`GridModel`] for multi-threaded hosts.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{model::GridModel, widget::Widget};

/// Cloneable handle serializing access to one model. Every call holds the lock
/// for the duration of the closure, so each operation is one writer at a time.
#[derive(Clone, Debug)]
pub struct SharedGrid {
    inner: Arc<Mutex<GridModel>>,
}

impl SharedGrid {
    /// Wrap `model` for sharing across threads.
    pub fn new(model: GridModel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(model)),
        }
    }

    /// Run `f` with shared access to the model.
    pub fn with<R>(&self, f: impl FnOnce(&GridModel) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Run `f` with exclusive access to the model.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut GridModel) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Copy of the committed active layout.
    pub fn snapshot(&self) -> Vec<Widget> {
        self.inner.lock().widgets().to_vec()
    }
}
