use std::time::{Duration, Instant};

use tracing::info;

use crate::controllers::run::scheduler::TileScheduler;
use crate::core::colour_mapping::map::ColourScheme;
use crate::core::executors::kinds::ExecutorKind;
use crate::core::executors::ports::executor::{Outbox, RunGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Progress counters of a run. `elapsed` is frozen once the run ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunMetrics {
    pub generation: u64,
    pub strategy: ExecutorKind,
    pub pixel_width: u32,
    pub total_pixels: usize,
    pub total_batches: usize,
    pub pixels_delivered: usize,
    pub batches_delivered: usize,
    pub batches_failed: usize,
    pub batches_discarded: usize,
    pub elapsed: Duration,
}

impl RunMetrics {
    #[must_use]
    pub fn rows_delivered(&self) -> usize {
        self.pixels_delivered / self.pixel_width.max(1) as usize
    }
}

pub(crate) struct Run {
    pub(crate) guard: RunGuard,
    pub(crate) outbox: Outbox,
    pub(crate) scheduler: TileScheduler,
    pub(crate) colours: Box<dyn ColourScheme>,
    pub(crate) metrics: RunMetrics,
    state: RunState,
    started: Instant,
}

impl Run {
    pub(crate) fn new(
        guard: RunGuard,
        outbox: Outbox,
        scheduler: TileScheduler,
        colours: Box<dyn ColourScheme>,
        pixel_width: u32,
        total_pixels: usize,
    ) -> Self {
        let metrics = RunMetrics {
            generation: guard.generation(),
            strategy: scheduler.kind(),
            pixel_width,
            total_pixels,
            total_batches: scheduler.total_batches(),
            pixels_delivered: 0,
            batches_delivered: 0,
            batches_failed: 0,
            batches_discarded: 0,
            elapsed: Duration::ZERO,
        };

        Self {
            guard,
            outbox,
            scheduler,
            colours,
            metrics,
            state: RunState::Running,
            started: Instant::now(),
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.guard.generation()
    }

    pub(crate) fn state(&self) -> RunState {
        self.state
    }

    /// Live counters; `elapsed` keeps ticking until the run ends.
    pub(crate) fn metrics(&self) -> RunMetrics {
        if self.state == RunState::Running {
            RunMetrics {
                elapsed: self.started.elapsed(),
                ..self.metrics
            }
        } else {
            self.metrics
        }
    }

    pub(crate) fn complete(&mut self) {
        if self.state != RunState::Running {
            return;
        }

        self.scheduler.release();
        self.state = RunState::Completed;
        self.metrics.elapsed = self.started.elapsed();

        info!(
            generation = self.generation(),
            strategy = self.metrics.strategy.config_name(),
            pixels = self.metrics.pixels_delivered,
            rows = self.metrics.rows_delivered(),
            failed_batches = self.metrics.batches_failed,
            elapsed_ms = self.metrics.elapsed.as_millis() as u64,
            "run completed"
        );
    }

    pub(crate) fn cancel(&mut self, reason: &'static str) {
        if self.state != RunState::Running {
            return;
        }

        self.guard.token().cancel();
        self.scheduler.release();
        self.state = RunState::Cancelled;
        self.metrics.elapsed = self.started.elapsed();

        info!(
            generation = self.generation(),
            reason,
            pixels = self.metrics.pixels_delivered,
            elapsed_ms = self.metrics.elapsed.as_millis() as u64,
            "run cancelled"
        );
    }
}
