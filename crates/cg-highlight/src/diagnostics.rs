//! Silent diagnostics
//!
//! Internal inconsistencies found during a pass are never surfaced to the
//! caller as failures. They go to a [`Diagnostics`] collaborator instead,
//! which the host supplies explicitly.

use std::sync::Mutex;

use crate::error::ClassifyError;

/// Receiver for non-fatal errors found during classification.
pub trait Diagnostics {
    /// Record `error` without interrupting the pass.
    fn record_silent(&self, error: &ClassifyError);
}

/// Discards everything.
impl Diagnostics for () {
    fn record_silent(&self, _error: &ClassifyError) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn record_silent(&self, error: &ClassifyError) {
        (**self).record_silent(error);
    }
}

/// Logs each error at `warn` level through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record_silent(&self, error: &ClassifyError) {
        tracing::warn!(target: "cg_highlight::diagnostics", "{}", error);
    }
}

/// Keeps every recorded error in memory.
///
/// Interior mutability lets the same collector be shared by reference
/// across several passes, including passes on other threads.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    errors: Mutex<Vec<ClassifyError>>,
}

impl CollectedDiagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded errors.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the recorded errors, oldest first.
    pub fn errors(&self) -> Vec<ClassifyError> {
        self.lock().clone()
    }

    /// Take the recorded errors, leaving the collector empty.
    pub fn take(&self) -> Vec<ClassifyError> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ClassifyError>> {
        // A panic while holding the lock leaves a valid Vec behind.
        self.errors.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn record_silent(&self, error: &ClassifyError) {
        self.lock().push(error.clone());
    }
}
