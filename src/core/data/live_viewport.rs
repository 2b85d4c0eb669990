use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::data::viewport::Dimensions;

/// Current pixel dimensions of the output surface, shared between the UI
/// (which publishes resizes) and every in-flight run (which compares them
/// against its captured viewport).
///
/// Width and height are packed into one atomic so readers never observe a
/// half-updated pair.
#[derive(Debug, Clone)]
pub struct LiveViewport {
    dimensions: Arc<AtomicU64>,
}

impl LiveViewport {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions: Arc::new(AtomicU64::new(dimensions.pack())),
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::unpack(self.dimensions.load(Ordering::Acquire))
    }

    pub fn set_dimensions(&self, dimensions: Dimensions) {
        self.dimensions.store(dimensions.pack(), Ordering::Release);
    }

    #[must_use]
    pub fn matches(&self, expected: Dimensions) -> bool {
        self.dimensions() == expected
    }
}
