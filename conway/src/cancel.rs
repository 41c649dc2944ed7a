// cancel.rs - Cooperative stop flag shared with the interrupt handler

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Starts `false`; flipped to `true` once by whoever handles the interrupt.
/// The run loop reads it once per iteration.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
