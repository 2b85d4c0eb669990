use crate::core::actions::cancellation::CancelToken;
use crate::core::data::viewport::Dimensions;
use crate::core::executors::ports::executor::RunGuard;

/// Why a finished batch was not handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StaleDelivery {
    #[error("batch of run {message} arrived during run {current}")]
    SupersededGeneration { message: u64, current: u64 },
    #[error("run {0} was cancelled")]
    Cancelled(u64),
    #[error("surface is {live}, run was started for {expected}")]
    ViewportMismatch { expected: Dimensions, live: Dimensions },
}

/// Decides whether a batch of `message_generation` may still reach the sink
/// of the run guarded by `guard`.
pub fn check_delivery(message_generation: u64, guard: &RunGuard) -> Result<(), StaleDelivery> {
    let current = guard.generation();
    if message_generation != current {
        return Err(StaleDelivery::SupersededGeneration {
            message: message_generation,
            current,
        });
    }

    if guard.token().is_cancelled() {
        return Err(StaleDelivery::Cancelled(current));
    }

    let live = guard.live_dimensions();
    if live != guard.expected_dimensions() {
        return Err(StaleDelivery::ViewportMismatch {
            expected: guard.expected_dimensions(),
            live,
        });
    }

    Ok(())
}
