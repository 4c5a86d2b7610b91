//! Host interrupt flag, checked by the dispatch loop between instructions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle to an interrupt flag.
///
/// Any clone may raise the flag from any thread; the interpreter observes it
/// at the next instruction boundary and stops with `EvalError::Interrupted`.
#[derive(Clone, Debug, Default)]
pub struct InterruptHandle(Arc<AtomicBool>);

impl InterruptHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the interpreter to stop.
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Lower the flag so execution can resume.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
