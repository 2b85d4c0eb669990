use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const CANCEL_CHECK_INTERVAL_PIXELS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Cancellation flag of one run, tagged with the run's generation.
///
/// Clones share the flag. Once set it is never reset; a new run gets a new token.
#[derive(Debug, Clone)]
pub struct RunToken {
    generation: u64,
    cancelled: Arc<AtomicBool>,
}

impl RunToken {
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sets the flag. Returns `true` only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::AcqRel)
    }
}

impl CancelToken for RunToken {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
