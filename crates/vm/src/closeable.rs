//! Closeable host resources with instance-bounded lifetimes.
//!
//! Host functions register resources they acquire (files, streams,
//! processes) against the instance; whatever is still registered when the
//! instance ends is closed, so a halfway-run script cannot leak what it
//! opened.

use std::io;
use std::rc::Rc;

/// A host resource whose lifetime is bounded by the script instance that
/// opened it.
pub trait Closeable {
    /// Releases the resource. Called at most once by the VM.
    fn close(&self) -> io::Result<()>;
}

/// The per-instance registration set. Membership is by identity.
#[derive(Default)]
pub(crate) struct CloseableSet {
    items: Vec<Rc<dyn Closeable>>,
}

impl CloseableSet {
    fn position(&self, closeable: &Rc<dyn Closeable>) -> Option<usize> {
        self.items
            .iter()
            .position(|item| Rc::ptr_eq(item, closeable))
    }

    /// Registers `closeable`; registering the same resource again is a
    /// no-op.
    pub fn register(&mut self, closeable: Rc<dyn Closeable>) {
        if self.position(&closeable).is_none() {
            self.items.push(closeable);
        }
    }

    /// Removes `closeable` without closing it. Returns `true` when it was
    /// registered.
    pub fn unregister(&mut self, closeable: &Rc<dyn Closeable>) -> bool {
        match self.position(closeable) {
            Some(at) => {
                self.items.remove(at);
                true
            }
            None => false,
        }
    }

    /// Returns `true` when `closeable` is registered.
    pub fn is_registered(&self, closeable: &Rc<dyn Closeable>) -> bool {
        self.position(closeable).is_some()
    }

    /// Returns the number of registered resources.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Closes and drops every registered resource. Close errors are logged
    /// and swallowed.
    pub fn close_all(&mut self) {
        for closeable in self.items.drain(..) {
            if let Err(error) = closeable.close() {
                log::warn!("closeable failed to close: {error}");
            }
        }
    }
}
