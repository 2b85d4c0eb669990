use std::str::FromStr;

/// How the batches of a run are computed and fed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutorKind {
    #[default]
    Serial,
    WorkerPool,
    BatchedFeedback,
    Accelerated,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected serial, workerPool, batchedFeedback, gpu or remote)")]
pub struct UnknownExecutorKind(pub String);

impl ExecutorKind {
    pub const ALL: &'static [Self] = &[
        Self::Serial,
        Self::WorkerPool,
        Self::BatchedFeedback,
        Self::Accelerated,
        Self::Remote,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Serial => "Serial",
            Self::WorkerPool => "Worker pool",
            Self::BatchedFeedback => "Batched feedback",
            Self::Accelerated => "Accelerated",
            Self::Remote => "Remote",
        }
    }

    #[must_use]
    pub const fn config_name(self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::WorkerPool => "workerPool",
            Self::BatchedFeedback => "batchedFeedback",
            Self::Accelerated => "gpu",
            Self::Remote => "remote",
        }
    }

    /// Strategies whose batches are computed on threads owned by the executor.
    #[must_use]
    pub const fn is_threaded(self) -> bool {
        matches!(self, Self::WorkerPool | Self::Remote)
    }
}

impl std::fmt::Display for ExecutorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl FromStr for ExecutorKind {
    type Err = UnknownExecutorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.config_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownExecutorKind(s.to_owned()))
    }
}
