use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, trace, warn};

use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::compute_iterations::errors::ComputeFailure;
use crate::core::actions::compute_iterations::ports::compute_backend::ComputeBackend;
use crate::core::data::tile::Tile;
use crate::core::executors::kinds::ExecutorKind;
use crate::core::executors::ports::executor::{
    Executor, Outbox, RangeJob, RunGuard, compute_batch,
};

/// One long-lived thread per worker range. Batch requests go in over a
/// channel; results come back through the outbox.
pub struct WorkerPoolExecutor {
    kind: ExecutorKind,
    backend: Arc<dyn ComputeBackend>,
    units: Vec<WorkerUnit>,
}

struct WorkerUnit {
    requests: Option<Sender<Tile>>,
    handle: Option<JoinHandle<()>>,
}

impl WorkerPoolExecutor {
    #[must_use]
    pub fn new(kind: ExecutorKind, backend: Arc<dyn ComputeBackend>) -> Self {
        Self {
            kind,
            backend,
            units: Vec::new(),
        }
    }

    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    fn worker_loop(
        range_index: usize,
        backend: &dyn ComputeBackend,
        guard: &RunGuard,
        requests: &Receiver<Tile>,
        outbox: &Outbox,
    ) {
        for tile in requests {
            if guard.is_cancelled() {
                trace!(
                    generation = outbox.generation(),
                    range_index,
                    "worker unit stopping on cancelled run"
                );
                return;
            }

            let outcome = compute_batch(backend, &tile, guard);

            if !outbox.post(range_index, tile.range(), outcome) {
                return;
            }
        }
    }
}

impl Executor for WorkerPoolExecutor {
    fn kind(&self) -> ExecutorKind {
        self.kind
    }

    fn submit(&mut self, job: RangeJob, outbox: &Outbox) {
        let (requests, inbox) = mpsc::channel::<Tile>();
        let backend = Arc::clone(&self.backend);
        let guard = job.guard.clone();
        let worker_outbox = outbox.clone();
        let range_index = job.range_index;

        let spawned = thread::Builder::new()
            .name(format!("tile-worker-{}-{range_index}", outbox.generation()))
            .spawn(move || {
                Self::worker_loop(range_index, backend.as_ref(), &guard, &inbox, &worker_outbox);
            });

        match spawned {
            Ok(handle) => {
                for tile in job.batches {
                    if requests.send(tile).is_err() {
                        break;
                    }
                }

                self.units.push(WorkerUnit {
                    requests: Some(requests),
                    handle: Some(handle),
                });
            }
            Err(err) => {
                warn!(
                    generation = outbox.generation(),
                    range_index,
                    error = %err,
                    "could not start worker unit"
                );

                for tile in &job.batches {
                    let failure = ComputeFailure::WorkerUnavailable(err.to_string());
                    if !outbox.post(range_index, tile.range(), Err(failure.into())) {
                        break;
                    }
                }
            }
        }
    }

    fn release(&mut self) {
        let mut detached = 0_usize;

        for mut unit in self.units.drain(..) {
            drop(unit.requests.take());

            if let Some(handle) = unit.handle.take() {
                if handle.is_finished() {
                    let _ = handle.join();
                } else {
                    detached += 1;
                }
            }
        }

        if detached > 0 {
            debug!(detached, "released worker units still finishing a batch");
        }
    }
}

impl Drop for WorkerPoolExecutor {
    fn drop(&mut self) {
        self.release();
    }
}
