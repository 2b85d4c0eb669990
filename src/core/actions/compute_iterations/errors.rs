use crate::core::actions::cancellation::Cancelled;

/// A backend could not produce iteration counts for a batch.
///
/// Recoverable: the batch's pixels stay unset and the run carries on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputeFailure {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("expected {expected} iteration counts, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("worker unavailable: {0}")]
    WorkerUnavailable(String),
    #[error("compute backend panicked: {0}")]
    BackendPanicked(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputeError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error(transparent)]
    Failure(#[from] ComputeFailure),
}
