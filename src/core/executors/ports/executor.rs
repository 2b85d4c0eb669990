use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;

use tracing::warn;

use crate::core::actions::cancellation::{CancelToken, RunToken};
use crate::core::actions::compute_iterations::errors::{ComputeError, ComputeFailure};
use crate::core::actions::compute_iterations::ports::compute_backend::ComputeBackend;
use crate::core::data::live_viewport::LiveViewport;
use crate::core::data::tile::{IndexRange, Tile};
use crate::core::data::viewport::Dimensions;
use crate::core::executors::kinds::ExecutorKind;

/// Result of one batch, tagged with the run that asked for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchMessage {
    pub generation: u64,
    pub range_index: usize,
    pub batch: IndexRange,
    pub outcome: Result<Vec<u32>, ComputeError>,
}

/// Sending half of the controller's mailbox, stamped with one run's generation.
#[derive(Debug, Clone)]
pub struct Outbox {
    generation: u64,
    sender: Sender<BatchMessage>,
}

impl Outbox {
    #[must_use]
    pub fn new(generation: u64, sender: Sender<BatchMessage>) -> Self {
        Self { generation, sender }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `false` once the mailbox is gone; callers stop computing then.
    pub fn post(
        &self,
        range_index: usize,
        batch: IndexRange,
        outcome: Result<Vec<u32>, ComputeError>,
    ) -> bool {
        self.sender
            .send(BatchMessage {
                generation: self.generation,
                range_index,
                batch,
                outcome,
            })
            .is_ok()
    }
}

/// Cancellation as seen by executors: the run token is set, or the surface
/// no longer has the dimensions the run was started for.
///
/// A mismatch sets the token, so the run stays cancelled even if the surface
/// is later resized back.
#[derive(Debug, Clone)]
pub struct RunGuard {
    token: RunToken,
    live_viewport: LiveViewport,
    expected: Dimensions,
}

impl RunGuard {
    #[must_use]
    pub fn new(token: RunToken, live_viewport: LiveViewport, expected: Dimensions) -> Self {
        Self {
            token,
            live_viewport,
            expected,
        }
    }

    #[must_use]
    pub fn token(&self) -> &RunToken {
        &self.token
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.token.generation()
    }

    #[must_use]
    pub fn expected_dimensions(&self) -> Dimensions {
        self.expected
    }

    #[must_use]
    pub fn live_dimensions(&self) -> Dimensions {
        self.live_viewport.dimensions()
    }

    #[must_use]
    pub fn viewport_matches(&self) -> bool {
        self.live_viewport.matches(self.expected)
    }
}

impl CancelToken for RunGuard {
    fn is_cancelled(&self) -> bool {
        if self.token.is_cancelled() {
            return true;
        }

        if !self.viewport_matches() {
            self.token.cancel();
            return true;
        }

        false
    }
}

/// Computes one batch, turning a backend panic into a per-batch failure so the
/// batch is still reported.
pub fn compute_batch(
    backend: &dyn ComputeBackend,
    tile: &Tile,
    guard: &RunGuard,
) -> Result<Vec<u32>, ComputeError> {
    panic::catch_unwind(AssertUnwindSafe(|| backend.compute(tile, guard))).unwrap_or_else(
        |payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_owned());

            warn!(
                generation = guard.generation(),
                backend = backend.name(),
                start = tile.start,
                stop = tile.stop,
                %message,
                "compute backend panicked"
            );

            Err(ComputeFailure::BackendPanicked(message).into())
        },
    )
}

/// One worker range, already split into batches in increasing index order.
#[derive(Debug, Clone)]
pub struct RangeJob {
    pub range_index: usize,
    pub batches: Vec<Tile>,
    pub guard: RunGuard,
}

/// Executes the batches of worker ranges and posts each result to the outbox.
///
/// `submit` must not wait for threaded work to finish. Inline strategies may
/// either compute during `submit` or queue the work and compute one batch per
/// `step`.
pub trait Executor: Send {
    fn kind(&self) -> ExecutorKind;

    fn submit(&mut self, job: RangeJob, outbox: &Outbox);

    /// Computes one unit of queued inline work. Returns `false` when there was
    /// nothing to do.
    fn step(&mut self, _outbox: &Outbox) -> bool {
        false
    }

    /// Whether queued inline work remains for `step`.
    fn has_pending(&self) -> bool {
        false
    }

    /// Stops accepting work and lets go of any units the executor owns.
    fn release(&mut self) {}
}
