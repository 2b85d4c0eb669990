use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::thread;

use crate::core::data::tile::Tile;
use crate::core::data::viewport::Viewport;
use crate::core::executors::kinds::ExecutorKind;
use crate::core::executors::ports::executor::{Executor, Outbox, RangeJob, RunGuard};
use crate::core::util::partition_pixel_ranges::{
    batch_pixels, partition_worker_ranges, split_into_batches,
};

/// Splits a run into worker ranges and batches, hands ranges to the executor
/// one at a time and keeps count of batches not yet reported back.
pub struct TileScheduler {
    plan: VecDeque<RangeJob>,
    executor: Box<dyn Executor>,
    total_batches: usize,
    outstanding: usize,
}

impl TileScheduler {
    #[must_use]
    pub fn new(
        viewport: &Viewport,
        max_iterations: u32,
        num_workers: NonZeroUsize,
        batch_size: u32,
        executor: Box<dyn Executor>,
        guard: &RunGuard,
    ) -> Self {
        let batch_len = batch_pixels(batch_size, viewport.pixel_width());

        let plan: VecDeque<RangeJob> = partition_worker_ranges(viewport.total_pixels(), num_workers)
            .into_iter()
            .enumerate()
            .map(|(range_index, range)| {
                let tile = Tile::for_range(viewport, range, max_iterations);

                RangeJob {
                    range_index,
                    batches: split_into_batches(range, batch_len)
                        .into_iter()
                        .map(|batch| tile.with_range(batch))
                        .collect(),
                    guard: guard.clone(),
                }
            })
            .collect();

        let total_batches = plan.iter().map(|job| job.batches.len()).sum();

        Self {
            plan,
            executor,
            total_batches,
            outstanding: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ExecutorKind {
        self.executor.kind()
    }

    #[must_use]
    pub fn total_batches(&self) -> usize {
        self.total_batches
    }

    #[must_use]
    pub fn range_count(&self) -> usize {
        self.plan.len()
    }

    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Submits the next worker range and yields. Returns `false` when every
    /// range has been dispatched.
    pub fn dispatch_next(&mut self, outbox: &Outbox) -> bool {
        let Some(job) = self.plan.pop_front() else {
            return false;
        };

        self.outstanding += job.batches.len();
        self.executor.submit(job, outbox);
        thread::yield_now();

        true
    }

    /// Runs one unit of queued inline work, if the executor has any.
    pub fn step(&mut self, outbox: &Outbox) -> bool {
        self.executor.step(outbox)
    }

    /// Accounts for one batch of this run having been reported.
    pub fn settle(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.plan.is_empty() && !self.executor.has_pending() && self.outstanding == 0
    }

    pub fn release(&mut self) {
        self.plan.clear();
        self.executor.release();
    }
}
