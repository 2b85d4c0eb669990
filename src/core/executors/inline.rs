use std::sync::Arc;

use tracing::trace;

use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::compute_iterations::ports::compute_backend::ComputeBackend;
use crate::core::executors::kinds::ExecutorKind;
use crate::core::executors::ports::executor::{Executor, Outbox, RangeJob, compute_batch};

/// Computes every batch of a range on the control thread while it is submitted.
///
/// Used for `Serial` with the plain kernel and for `Accelerated` with the rayon
/// backend; the backend decides how a single batch is spread out.
pub struct InlineExecutor {
    kind: ExecutorKind,
    backend: Arc<dyn ComputeBackend>,
}

impl InlineExecutor {
    #[must_use]
    pub fn new(kind: ExecutorKind, backend: Arc<dyn ComputeBackend>) -> Self {
        Self { kind, backend }
    }
}

impl Executor for InlineExecutor {
    fn kind(&self) -> ExecutorKind {
        self.kind
    }

    fn submit(&mut self, job: RangeJob, outbox: &Outbox) {
        for tile in &job.batches {
            if job.guard.is_cancelled() {
                trace!(
                    generation = outbox.generation(),
                    range_index = job.range_index,
                    "run cancelled, skipping remaining batches"
                );
                return;
            }

            let outcome = compute_batch(self.backend.as_ref(), tile, &job.guard);

            if !outbox.post(job.range_index, tile.range(), outcome) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use crate::core::actions::cancellation::RunToken;
    use crate::core::actions::compute_iterations::backends::{AcceleratedBackend, KernelBackend};
    use crate::core::actions::compute_iterations::compute_iterations::compute_iterations;
    use crate::core::data::live_viewport::LiveViewport;
    use crate::core::data::tile::{IndexRange, Tile};
    use crate::core::data::viewport::{Dimensions, Viewport};
    use crate::core::executors::ports::executor::RunGuard;
    use crate::core::util::partition_pixel_ranges::{batch_pixels, split_into_batches};

    fn job(guard: RunGuard) -> RangeJob {
        let viewport = Viewport::new(16, 8, 0.0, 0.0, 4.0).unwrap();
        let range = IndexRange::new(16, 112);
        let batches = split_into_batches(range, batch_pixels(2, 16))
            .into_iter()
            .map(|batch| Tile::for_range(&viewport, batch, 30))
            .collect();

        RangeJob {
            range_index: 1,
            batches,
            guard,
        }
    }

    fn guard(token: &RunToken) -> RunGuard {
        let dimensions = Dimensions::new(16, 8);
        RunGuard::new(token.clone(), LiveViewport::new(dimensions), dimensions)
    }

    #[test]
    fn posts_every_batch_in_order() {
        let token = RunToken::new(4);
        let job = job(guard(&token));
        let expected: Vec<_> = job.batches.iter().map(compute_iterations).collect();
        let (sender, receiver) = mpsc::channel();
        let mut executor = InlineExecutor::new(ExecutorKind::Serial, Arc::new(KernelBackend));

        executor.submit(job, &Outbox::new(4, sender));

        let messages: Vec<_> = receiver.try_iter().collect();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].batch, IndexRange::new(16, 48));
        assert_eq!(messages[2].batch, IndexRange::new(80, 112));
        for (message, counts) in messages.iter().zip(expected) {
            assert_eq!(message.generation, 4);
            assert_eq!(message.range_index, 1);
            assert_eq!(message.outcome, Ok(counts));
        }
    }

    #[test]
    fn accelerated_backend_matches_serial() {
        let token = RunToken::new(1);
        let (serial_tx, serial_rx) = mpsc::channel();
        let (fast_tx, fast_rx) = mpsc::channel();

        InlineExecutor::new(ExecutorKind::Serial, Arc::new(KernelBackend))
            .submit(job(guard(&token)), &Outbox::new(1, serial_tx));
        InlineExecutor::new(ExecutorKind::Accelerated, Arc::new(AcceleratedBackend))
            .submit(job(guard(&token)), &Outbox::new(1, fast_tx));

        let serial: Vec<_> = serial_rx.try_iter().collect();
        let fast: Vec<_> = fast_rx.try_iter().collect();
        assert_eq!(serial, fast);
    }

    #[test]
    fn cancelled_run_posts_nothing() {
        let token = RunToken::new(2);
        token.cancel();
        let (sender, receiver) = mpsc::channel();
        let mut executor = InlineExecutor::new(ExecutorKind::Serial, Arc::new(KernelBackend));

        executor.submit(job(guard(&token)), &Outbox::new(2, sender));

        assert_eq!(receiver.try_iter().count(), 0);
        assert!(!executor.has_pending());
    }
}
