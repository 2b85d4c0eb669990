use std::sync::Arc;

use crate::core::actions::compute_iterations::backends::{AcceleratedBackend, KernelBackend};
use crate::core::actions::compute_iterations::ports::compute_backend::ComputeBackend;
use crate::core::executors::batched_feedback::BatchedFeedbackExecutor;
use crate::core::executors::inline::InlineExecutor;
use crate::core::executors::kinds::ExecutorKind;
use crate::core::executors::ports::executor::Executor;
use crate::core::executors::worker_pool::WorkerPoolExecutor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} executor needs a remote compute backend")]
pub struct MissingRemoteBackend(pub ExecutorKind);

/// Builds the executor for one run.
///
/// `backend` replaces the strategy's own compute backend. The remote strategy
/// has none of its own and fails without one.
pub fn executor_factory(
    kind: ExecutorKind,
    backend: Option<Arc<dyn ComputeBackend>>,
) -> Result<Box<dyn Executor>, MissingRemoteBackend> {
    let kernel = |backend: Option<Arc<dyn ComputeBackend>>| -> Arc<dyn ComputeBackend> {
        backend.unwrap_or_else(|| Arc::new(KernelBackend))
    };

    let executor: Box<dyn Executor> = match kind {
        ExecutorKind::Serial => Box::new(InlineExecutor::new(kind, kernel(backend))),
        ExecutorKind::Accelerated => {
            let backend = backend.unwrap_or_else(|| Arc::new(AcceleratedBackend));
            Box::new(InlineExecutor::new(kind, backend))
        }
        ExecutorKind::BatchedFeedback => Box::new(BatchedFeedbackExecutor::new(kernel(backend))),
        ExecutorKind::WorkerPool => Box::new(WorkerPoolExecutor::new(kind, kernel(backend))),
        ExecutorKind::Remote => {
            let backend = backend.ok_or(MissingRemoteBackend(kind))?;
            Box::new(WorkerPoolExecutor::new(kind, backend))
        }
    };

    Ok(executor)
}
