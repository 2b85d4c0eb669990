use std::collections::VecDeque;
use std::sync::Arc;

use tracing::trace;

use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::compute_iterations::ports::compute_backend::ComputeBackend;
use crate::core::executors::kinds::ExecutorKind;
use crate::core::executors::ports::executor::{Executor, Outbox, RangeJob, compute_batch};

/// Queues submitted ranges and computes a single batch per `step`, taking
/// ranges round-robin so every worker range fills in progressively.
pub struct BatchedFeedbackExecutor {
    backend: Arc<dyn ComputeBackend>,
    pending: VecDeque<PendingRange>,
}

struct PendingRange {
    job: RangeJob,
    next_batch: usize,
}

impl BatchedFeedbackExecutor {
    #[must_use]
    pub fn new(backend: Arc<dyn ComputeBackend>) -> Self {
        Self {
            backend,
            pending: VecDeque::new(),
        }
    }
}

impl Executor for BatchedFeedbackExecutor {
    fn kind(&self) -> ExecutorKind {
        ExecutorKind::BatchedFeedback
    }

    fn submit(&mut self, job: RangeJob, _outbox: &Outbox) {
        if !job.batches.is_empty() {
            self.pending.push_back(PendingRange { job, next_batch: 0 });
        }
    }

    fn step(&mut self, outbox: &Outbox) -> bool {
        let Some(mut range) = self.pending.pop_front() else {
            return false;
        };

        if range.job.guard.is_cancelled() {
            trace!(
                generation = outbox.generation(),
                dropped_ranges = self.pending.len() + 1,
                "run cancelled, dropping queued batches"
            );
            self.pending.clear();
            return false;
        }

        let tile = range.job.batches[range.next_batch];
        let outcome = compute_batch(self.backend.as_ref(), &tile, &range.job.guard);
        if !outbox.post(range.job.range_index, tile.range(), outcome) {
            self.pending.clear();
            return false;
        }

        range.next_batch += 1;
        if range.next_batch < range.job.batches.len() {
            self.pending.push_back(range);
        }

        true
    }

    fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn release(&mut self) {
        self.pending.clear();
    }
}
