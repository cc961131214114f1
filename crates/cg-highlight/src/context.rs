//! Per-pass options and cancellation for [`classify_with`](crate::classify_with)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Options for one walk over a syntax tree.
///
/// The walk polls the interrupt flag before each node and returns
/// [`ClassifyError::Interrupted`](crate::ClassifyError::Interrupted) once it
/// is set, leaving whatever was already emitted in the sink. Clones share
/// the flag: an editor that starts a new pass after a keystroke can stop
/// the stale one through its own clone.
#[derive(Debug, Clone)]
pub struct ClassifyContext {
    /// Set to stop the walk before the next node
    pub interrupt: Arc<AtomicBool>,

    /// Log each emitted highlight and the node it came from at `trace`
    /// level
    pub trace: bool,
}

impl Default for ClassifyContext {
    fn default() -> Self {
        Self {
            interrupt: Arc::new(AtomicBool::new(false)),
            trace: false,
        }
    }
}

impl ClassifyContext {
    /// Uninterrupted, without highlight tracing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`new`](Self::new), with highlight tracing on.
    pub fn with_trace() -> Self {
        Self {
            trace: true,
            ..Default::default()
        }
    }

    /// True once a stop was requested and not yet reset.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Stop any walk using this flag before it visits another node.
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Clear a stop request so the context can drive a fresh pass.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_shared_between_clones() {
        let ctx = ClassifyContext::new();
        let handle = ctx.clone();
        assert!(!ctx.is_interrupted());
        handle.interrupt();
        assert!(ctx.is_interrupted());
        ctx.reset_interrupt();
        assert!(!handle.is_interrupted());
    }

    #[test]
    fn test_with_trace() {
        assert!(ClassifyContext::with_trace().trace);
        assert!(!ClassifyContext::default().trace);
    }
}
