use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::controllers::run::config::{ConfigurationError, RemoteConfig, RunConfig};
use crate::controllers::run::delivery::{StaleDelivery, check_delivery};
use crate::controllers::run::ports::patch_sink::PatchSink;
use crate::controllers::run::run::{Run, RunMetrics, RunState};
use crate::controllers::run::scheduler::TileScheduler;
use crate::core::actions::cancellation::{CancelToken, RunToken};
use crate::core::actions::compute_iterations::errors::ComputeError;
use crate::core::actions::compute_iterations::ports::compute_backend::ComputeBackend;
use crate::core::colour_mapping::factory::colour_scheme_factory;
use crate::core::data::live_viewport::LiveViewport;
use crate::core::data::result_patch::ResultPatch;
use crate::core::data::viewport::Viewport;
use crate::core::executors::factory::executor_factory;
use crate::core::executors::kinds::ExecutorKind;
use crate::core::executors::ports::executor::{BatchMessage, Outbox, RunGuard};
use crate::core::executors::remote::backend::RemoteBackend;
use crate::core::executors::remote::client::HttpClient;

/// Upper bound on a single blocking wait, so a resize is noticed even while
/// no batch arrives.
const MAILBOX_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Owns the mailbox and at most one live run.
///
/// Starting a run cancels the previous one. Every batch result passes the
/// delivery gate on this thread before it is coloured and handed out, so a
/// sink never sees a patch from a superseded, cancelled or resized run.
pub struct RunController {
    mailbox: Receiver<BatchMessage>,
    sender: Sender<BatchMessage>,
    next_generation: u64,
    current: Option<Run>,
    live_viewport: LiveViewport,
    http_client: Option<Arc<dyn HttpClient>>,
    backends: HashMap<ExecutorKind, Arc<dyn ComputeBackend>>,
}

impl Default for RunController {
    fn default() -> Self {
        Self::new()
    }
}

impl RunController {
    #[must_use]
    pub fn new() -> Self {
        let (sender, mailbox) = mpsc::channel();

        Self {
            mailbox,
            sender,
            next_generation: 1,
            current: None,
            live_viewport: LiveViewport::new(Viewport::default().dimensions()),
            http_client: None,
            backends: HashMap::new(),
        }
    }

    /// Uses `client` for the remote strategy instead of building one.
    #[must_use]
    pub fn with_http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Runs `kind` on `backend` instead of the strategy's own compute backend.
    #[must_use]
    pub fn with_backend(mut self, kind: ExecutorKind, backend: Arc<dyn ComputeBackend>) -> Self {
        self.backends.insert(kind, backend);
        self
    }

    /// Handle the UI uses to publish the surface's current size.
    #[must_use]
    pub fn live_viewport(&self) -> LiveViewport {
        self.live_viewport.clone()
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.current.as_ref().map_or(RunState::Idle, Run::state)
    }

    #[must_use]
    pub fn current_generation(&self) -> Option<u64> {
        self.current.as_ref().map(Run::generation)
    }

    #[must_use]
    pub fn metrics(&self) -> Option<RunMetrics> {
        self.current.as_ref().map(Run::metrics)
    }

    /// Validates `config`, then replaces the current run with a new one.
    ///
    /// The config must match the size last published through
    /// [`RunController::live_viewport`]. A rejected config leaves the current
    /// run untouched.
    pub fn start_run(&mut self, config: RunConfig) -> Result<u64, ConfigurationError> {
        config.validate()?;

        let configured = config.viewport.dimensions();
        let live = self.live_viewport.dimensions();
        if configured != live {
            return Err(ConfigurationError::ViewportMismatch { configured, live });
        }

        let backend = match self.backends.get(&config.strategy) {
            Some(backend) => Some(Arc::clone(backend)),
            None => self.remote_backend(&config)?,
        };
        let executor = executor_factory(config.strategy, backend)
            .map_err(|e| ConfigurationError::StrategyUnavailable(e.0))?;
        let num_workers =
            NonZeroUsize::new(config.num_workers).ok_or(ConfigurationError::ZeroWorkers)?;

        if let Some(previous) = self.current.as_mut() {
            previous.cancel("superseded");
        }

        let discarded = self.mailbox.try_iter().count();
        if discarded > 0 {
            debug!(discarded, "dropped queued batches of earlier runs");
        }

        let generation = self.next_generation;
        self.next_generation += 1;

        let viewport = config.viewport;
        let guard = RunGuard::new(RunToken::new(generation), self.live_viewport.clone(), configured);
        let scheduler = TileScheduler::new(
            &viewport,
            config.max_iterations,
            num_workers,
            config.batch_size,
            executor,
            &guard,
        );

        info!(
            generation,
            strategy = config.strategy.config_name(),
            colour_scheme = config.colour_scheme.config_name(),
            dimensions = %configured,
            zoom = viewport.zoom(),
            max_iterations = config.max_iterations,
            ranges = scheduler.range_count(),
            batches = scheduler.total_batches(),
            "run started"
        );

        self.current = Some(Run::new(
            guard,
            Outbox::new(generation, self.sender.clone()),
            scheduler,
            colour_scheme_factory(config.colour_scheme, config.max_iterations),
            viewport.pixel_width(),
            viewport.total_pixels(),
        ));

        Ok(generation)
    }

    /// Cancels the current run, if it is still running.
    pub fn cancel(&mut self) {
        if let Some(run) = self.current.as_mut() {
            run.cancel("cancelled by caller");
        }
    }

    /// Blocking iterator over the current run's patches. Ends when the run
    /// completes or is cancelled.
    pub fn patches(&mut self) -> Patches<'_> {
        Patches { controller: self }
    }

    /// Drives the current run to a terminal state, delivering every patch.
    pub fn render_into<S: PatchSink + ?Sized>(&mut self, sink: &mut S) -> RunState {
        while let Some(patch) = self.next_patch(None) {
            sink.deliver(patch);
        }

        self.state()
    }

    /// Delivers whatever becomes ready within `max_wait` and returns the run's
    /// state afterwards. Suited to a UI frame loop.
    pub fn pump<S: PatchSink + ?Sized>(&mut self, sink: &mut S, max_wait: Duration) -> RunState {
        let deadline = Instant::now() + max_wait;

        while let Some(patch) = self.next_patch(Some(deadline)) {
            sink.deliver(patch);

            if Instant::now() >= deadline {
                break;
            }
        }

        self.state()
    }

    fn next_patch(&mut self, deadline: Option<Instant>) -> Option<ResultPatch> {
        loop {
            let run = self.current.as_mut()?;
            if run.state() != RunState::Running {
                return None;
            }

            if run.guard.is_cancelled() {
                run.cancel("viewport resized");
                return None;
            }

            match self.mailbox.try_recv() {
                Ok(message) => {
                    if let Some(patch) = Self::accept(run, message) {
                        return Some(patch);
                    }
                    continue;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => return None,
            }

            if run.scheduler.dispatch_next(&run.outbox) || run.scheduler.step(&run.outbox) {
                continue;
            }

            if run.scheduler.is_settled() {
                run.complete();
                return None;
            }

            let wait = match deadline {
                None => MAILBOX_POLL_INTERVAL,
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return None;
                    }
                    remaining.min(MAILBOX_POLL_INTERVAL)
                }
            };

            match self.mailbox.recv_timeout(wait) {
                Ok(message) => {
                    if let Some(patch) = Self::accept(run, message) {
                        return Some(patch);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Gates one batch result and colours it if it may be delivered.
    fn accept(run: &mut Run, message: BatchMessage) -> Option<ResultPatch> {
        if let Err(stale) = check_delivery(message.generation, &run.guard) {
            trace!(
                generation = message.generation,
                range_index = message.range_index,
                start = message.batch.start,
                reason = %stale,
                "discarding batch"
            );

            if message.generation == run.generation() {
                run.scheduler.settle();
                run.metrics.batches_discarded += 1;
            }

            if matches!(stale, StaleDelivery::ViewportMismatch { .. }) {
                run.cancel("viewport resized");
            }

            return None;
        }

        run.scheduler.settle();

        match message.outcome {
            Ok(counts) => {
                let colours = counts
                    .into_iter()
                    .map(|iterations| run.colours.colour(iterations))
                    .collect::<Vec<_>>();

                run.metrics.batches_delivered += 1;
                run.metrics.pixels_delivered += colours.len();

                Some(ResultPatch {
                    generation: message.generation,
                    start_index: message.batch.start,
                    colours,
                })
            }
            Err(ComputeError::Cancelled(_)) => {
                trace!(
                    generation = message.generation,
                    range_index = message.range_index,
                    "batch cancelled"
                );
                None
            }
            Err(ComputeError::Failure(failure)) => {
                warn!(
                    generation = message.generation,
                    range_index = message.range_index,
                    start = message.batch.start,
                    stop = message.batch.stop,
                    error = %failure,
                    "batch failed, leaving its pixels unset"
                );
                run.metrics.batches_failed += 1;
                None
            }
        }
    }

    fn remote_backend(
        &self,
        config: &RunConfig,
    ) -> Result<Option<Arc<dyn ComputeBackend>>, ConfigurationError> {
        if config.strategy != ExecutorKind::Remote {
            return Ok(None);
        }

        let remote = config
            .remote
            .as_ref()
            .ok_or(ConfigurationError::MissingRemoteEndpoint)?;

        let client = match &self.http_client {
            Some(client) => Arc::clone(client),
            None => default_http_client(remote)?,
        };

        Ok(Some(Arc::new(RemoteBackend::new(
            client,
            &remote.endpoint,
            remote.lambda,
        ))))
    }
}

#[cfg(feature = "remote")]
fn default_http_client(remote: &RemoteConfig) -> Result<Arc<dyn HttpClient>, ConfigurationError> {
    use crate::core::executors::remote::client::ReqwestClient;

    let client = ReqwestClient::with_timeout(remote.timeout)
        .map_err(|e| ConfigurationError::RemoteClient(e.to_string()))?;

    Ok(Arc::new(client))
}

#[cfg(not(feature = "remote"))]
fn default_http_client(_remote: &RemoteConfig) -> Result<Arc<dyn HttpClient>, ConfigurationError> {
    Err(ConfigurationError::StrategyUnavailable(ExecutorKind::Remote))
}

impl Drop for RunController {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Iterator returned by [`RunController::patches`].
pub struct Patches<'a> {
    controller: &'a mut RunController,
}

impl Iterator for Patches<'_> {
    type Item = ResultPatch;

    fn next(&mut self) -> Option<Self::Item> {
        self.controller.next_patch(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::core::actions::compute_iterations::compute_iterations::escape_iterations;
    use crate::core::actions::compute_iterations::errors::ComputeFailure;
    use crate::core::colour_mapping::kinds::ColourSchemeKind;
    use crate::core::data::pixel_buffer::PixelBuffer;
    use crate::core::data::tile::Tile;
    use crate::core::data::viewport::Dimensions;

    fn small_config(strategy: ExecutorKind) -> RunConfig {
        RunConfig {
            viewport: Viewport::new(48, 32, -10.0, 0.0, 14.0).unwrap(),
            max_iterations: 60,
            strategy,
            num_workers: 3,
            batch_size: 4,
            colour_scheme: ColourSchemeKind::Blue,
            remote: None,
        }
    }

    /// Controller whose surface already has the size `config` renders at.
    fn controller_for(config: &RunConfig) -> RunController {
        let controller = RunController::new();
        controller.live_viewport().set_dimensions(config.viewport.dimensions());
        controller
    }

    fn expected_frame(config: &RunConfig) -> PixelBuffer {
        let mut colours = colour_scheme_factory(config.colour_scheme, config.max_iterations);
        let mut buffer = PixelBuffer::new(config.viewport.dimensions());

        for index in 0..config.viewport.total_pixels() {
            let (x0, y0) = config.viewport.pixel_to_plane(index);
            let colour = colours.colour(escape_iterations(x0, y0, config.max_iterations));
            buffer.set_pixel(index, colour).unwrap();
        }

        buffer
    }

    /// Answers with all-ones counts, except for batches starting at `fail_at`.
    struct FakeLambda {
        fail_at: usize,
        requests: Mutex<usize>,
    }

    fn query_value(url: &str, key: &str) -> usize {
        url.split(['?', '&'])
            .find_map(|pair| pair.strip_prefix(key)?.strip_prefix('='))
            .and_then(|value| value.parse().ok())
            .unwrap()
    }

    impl HttpClient for FakeLambda {
        fn get(&self, url: &str) -> Result<Vec<u8>, ComputeFailure> {
            *self.requests.lock().unwrap() += 1;

            let start = query_value(url, "start");
            let stop = query_value(url, "stop");
            if start == self.fail_at {
                return Err(ComputeFailure::Transport("connection reset".to_owned()));
            }

            Ok(serde_json::to_vec(&vec![1_u32; stop - start]).unwrap())
        }
    }

    #[test]
    fn serial_run_completes_with_full_frame() {
        let config = small_config(ExecutorKind::Serial);
        let mut controller = controller_for(&config);
        let mut buffer = PixelBuffer::new(config.viewport.dimensions());

        let generation = controller.start_run(config.clone()).unwrap();
        let state = controller.render_into(&mut buffer);

        assert_eq!(state, RunState::Completed);
        assert_eq!(buffer.buffer(), expected_frame(&config).buffer());

        let metrics = controller.metrics().unwrap();
        assert_eq!(metrics.generation, generation);
        assert_eq!(metrics.pixels_delivered, 48 * 32);
        assert_eq!(metrics.rows_delivered(), 32);
        assert_eq!(metrics.batches_delivered, metrics.total_batches);
        assert_eq!(metrics.batches_failed, 0);
    }

    #[test]
    fn every_local_strategy_renders_the_same_frame() {
        let expected = expected_frame(&small_config(ExecutorKind::Serial));

        for strategy in [
            ExecutorKind::WorkerPool,
            ExecutorKind::BatchedFeedback,
            ExecutorKind::Accelerated,
        ] {
            let config = small_config(strategy);
            let mut controller = controller_for(&config);
            let mut buffer = PixelBuffer::new(config.viewport.dimensions());

            controller.start_run(config).unwrap();

            assert_eq!(controller.render_into(&mut buffer), RunState::Completed);
            assert_eq!(buffer.buffer(), expected.buffer(), "strategy {strategy}");
        }
    }

    #[test]
    fn batched_feedback_yields_one_patch_per_batch() {
        let config = RunConfig {
            num_workers: 1,
            batch_size: 1,
            ..small_config(ExecutorKind::BatchedFeedback)
        };
        let mut controller = controller_for(&config);
        controller.start_run(config).unwrap();

        let starts: Vec<usize> = controller.patches().map(|patch| patch.start_index).collect();

        assert_eq!(starts, (0..32).map(|row| row * 48).collect::<Vec<_>>());
    }

    #[test]
    fn generations_increase_per_run() {
        let mut controller = controller_for(&small_config(ExecutorKind::Serial));

        let first = controller.start_run(small_config(ExecutorKind::Serial)).unwrap();
        let second = controller.start_run(small_config(ExecutorKind::Serial)).unwrap();

        assert!(second > first);
        assert_eq!(controller.current_generation(), Some(second));
    }

    #[test]
    fn second_run_supersedes_first() {
        let first_config = RunConfig {
            num_workers: 4,
            batch_size: 1,
            ..small_config(ExecutorKind::WorkerPool)
        };
        let second_config = RunConfig {
            colour_scheme: ColourSchemeKind::Rainbow,
            ..first_config.clone()
        };
        let mut controller = controller_for(&first_config);

        let first = controller.start_run(first_config).unwrap();
        let early = controller.patches().next().unwrap();
        assert_eq!(early.generation, first);

        let second = controller.start_run(second_config.clone()).unwrap();
        let mut buffer = PixelBuffer::new(second_config.viewport.dimensions());
        let mut generations = Vec::new();
        let state = controller.render_into(&mut |patch: ResultPatch| {
            generations.push(patch.generation);
            buffer.deliver(patch);
        });

        assert_eq!(state, RunState::Completed);
        assert!(generations.iter().all(|&generation| generation == second));
        assert_eq!(buffer.buffer(), expected_frame(&second_config).buffer());
    }

    #[test]
    fn cancel_stops_delivery() {
        let mut controller = controller_for(&small_config(ExecutorKind::BatchedFeedback));
        controller
            .start_run(RunConfig {
                batch_size: 1,
                ..small_config(ExecutorKind::BatchedFeedback)
            })
            .unwrap();

        assert!(controller.patches().next().is_some());

        controller.cancel();

        assert_eq!(controller.state(), RunState::Cancelled);
        assert!(controller.patches().next().is_none());
        assert_eq!(controller.metrics().unwrap().pixels_delivered, 48);
    }

    #[test]
    fn resize_cancels_running_run() {
        let mut controller = controller_for(&small_config(ExecutorKind::BatchedFeedback));
        controller
            .start_run(RunConfig {
                batch_size: 1,
                ..small_config(ExecutorKind::BatchedFeedback)
            })
            .unwrap();
        let live = controller.live_viewport();

        assert!(controller.patches().next().is_some());

        live.set_dimensions(Dimensions::new(64, 32));

        assert!(controller.patches().next().is_none());
        assert_eq!(controller.state(), RunState::Cancelled);
    }

    #[test]
    fn rejected_config_keeps_previous_run() {
        let mut controller = controller_for(&small_config(ExecutorKind::Serial));
        let generation = controller.start_run(small_config(ExecutorKind::Serial)).unwrap();

        let rejected = controller.start_run(RunConfig {
            max_iterations: 0,
            ..small_config(ExecutorKind::Serial)
        });

        assert_eq!(rejected, Err(ConfigurationError::ZeroMaxIterations));
        assert_eq!(controller.current_generation(), Some(generation));
        assert_eq!(controller.state(), RunState::Running);
    }

    #[test]
    fn remote_failures_are_per_batch() {
        let client = Arc::new(FakeLambda {
            fail_at: 0,
            requests: Mutex::new(0),
        });
        let config = RunConfig {
            remote: Some(RemoteConfig::new("http://lambda.test")),
            ..small_config(ExecutorKind::Remote)
        };
        let mut controller = controller_for(&config).with_http_client(client.clone());
        let mut delivered = Vec::new();

        controller.start_run(config).unwrap();
        let state = controller.render_into(&mut |patch: ResultPatch| delivered.push(patch));

        let metrics = controller.metrics().unwrap();
        assert_eq!(state, RunState::Completed);
        assert_eq!(metrics.batches_failed, 1);
        assert_eq!(*client.requests.lock().unwrap(), metrics.total_batches);
        // four-row batches of a 48-wide frame
        assert_eq!(metrics.pixels_delivered, 48 * 32 - 4 * 48);
        assert!(delivered.iter().all(|patch| patch.start_index != 0));
    }

    #[cfg(not(feature = "remote"))]
    #[test]
    fn remote_without_http_client_is_unavailable() {
        let mut controller = controller_for(&small_config(ExecutorKind::Remote));

        let result = controller.start_run(RunConfig {
            remote: Some(RemoteConfig::new("http://lambda.test")),
            ..small_config(ExecutorKind::Remote)
        });

        assert_eq!(
            result,
            Err(ConfigurationError::StrategyUnavailable(ExecutorKind::Remote))
        );
        assert_eq!(controller.state(), RunState::Idle);
    }

    #[test]
    fn pump_reaches_completion() {
        let config = small_config(ExecutorKind::WorkerPool);
        let mut controller = controller_for(&config);
        let mut buffer = PixelBuffer::new(config.viewport.dimensions());
        controller.start_run(config.clone()).unwrap();

        let started = Instant::now();
        let mut state = RunState::Running;
        while !state.is_terminal() && started.elapsed() < Duration::from_secs(10) {
            state = controller.pump(&mut buffer, Duration::from_millis(5));
        }

        assert_eq!(state, RunState::Completed);
        assert_eq!(buffer.buffer(), expected_frame(&config).buffer());
    }

    #[test]
    fn start_run_rejects_size_the_surface_does_not_have() {
        let mut controller = RunController::new();

        let rejected = controller.start_run(small_config(ExecutorKind::Serial));

        assert_eq!(
            rejected,
            Err(ConfigurationError::ViewportMismatch {
                configured: Dimensions::new(48, 32),
                live: Dimensions::new(800, 600),
            })
        );
        assert_eq!(controller.state(), RunState::Idle);
        assert_eq!(controller.live_viewport().dimensions(), Dimensions::new(800, 600));
    }

    /// Holds the first request until released, then answers like [`FakeLambda`].
    struct GatedLambda {
        entered: Mutex<Option<mpsc::Sender<()>>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl HttpClient for GatedLambda {
        fn get(&self, url: &str) -> Result<Vec<u8>, ComputeFailure> {
            if let Some(entered) = self.entered.lock().unwrap().take() {
                entered.send(()).unwrap();
                self.release.lock().unwrap().recv().unwrap();
            }

            let count = query_value(url, "stop") - query_value(url, "start");
            Ok(serde_json::to_vec(&vec![1_u32; count]).unwrap())
        }
    }

    #[test]
    fn resize_seen_only_by_a_worker_still_cancels_run() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let client = Arc::new(GatedLambda {
            entered: Mutex::new(Some(entered_tx)),
            release: Mutex::new(release_rx),
        });
        let config = RunConfig {
            viewport: Viewport::new(16, 8, -2.0, 0.0, 4.0).unwrap(),
            num_workers: 1,
            batch_size: 1,
            remote: Some(RemoteConfig::new("http://lambda.test")),
            ..small_config(ExecutorKind::Remote)
        };
        let mut controller = controller_for(&config).with_http_client(client);
        let live = controller.live_viewport();
        let mut delivered = Vec::new();

        controller.start_run(config).unwrap();
        controller.pump(&mut |patch: ResultPatch| delivered.push(patch), Duration::from_millis(1));
        entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        // The worker finishes its batch, then finds the surface resized.
        live.set_dimensions(Dimensions::new(17, 8));
        release_tx.send(()).unwrap();
        std::thread::sleep(Duration::from_millis(200));
        live.set_dimensions(Dimensions::new(16, 8));

        let started = Instant::now();
        let mut state = RunState::Running;
        while !state.is_terminal() && started.elapsed() < Duration::from_secs(5) {
            state = controller.pump(
                &mut |patch: ResultPatch| delivered.push(patch),
                Duration::from_millis(10),
            );
        }

        assert_eq!(state, RunState::Cancelled);
        assert!(delivered.len() < 8);
    }

    struct PanickingLambda;

    impl HttpClient for PanickingLambda {
        fn get(&self, _url: &str) -> Result<Vec<u8>, ComputeFailure> {
            panic!("lambda crashed");
        }
    }

    #[test]
    fn backend_panics_fail_batches_without_stalling_run() {
        let config = RunConfig {
            remote: Some(RemoteConfig::new("http://lambda.test")),
            ..small_config(ExecutorKind::Remote)
        };
        let mut controller = controller_for(&config).with_http_client(Arc::new(PanickingLambda));
        let mut buffer = PixelBuffer::new(config.viewport.dimensions());

        controller.start_run(config).unwrap();
        let state = controller.render_into(&mut buffer);

        let metrics = controller.metrics().unwrap();
        assert_eq!(state, RunState::Completed);
        assert_eq!(metrics.batches_failed, metrics.total_batches);
        assert_eq!(metrics.pixels_delivered, 0);
    }

    /// Answers every pixel with the same count.
    struct ConstantBackend {
        iterations: u32,
        calls: Mutex<usize>,
    }

    impl ComputeBackend for ConstantBackend {
        fn name(&self) -> &str {
            "constant"
        }

        fn compute(
            &self,
            tile: &Tile,
            _cancel: &dyn CancelToken,
        ) -> Result<Vec<u32>, ComputeError> {
            *self.calls.lock().unwrap() += 1;
            Ok(vec![self.iterations; tile.len()])
        }
    }

    #[test]
    fn injected_backend_replaces_strategy_backend() {
        let backend = Arc::new(ConstantBackend {
            iterations: 7,
            calls: Mutex::new(0),
        });
        let config = small_config(ExecutorKind::Serial);
        let mut controller =
            controller_for(&config).with_backend(ExecutorKind::Serial, backend.clone());
        let mut patches = Vec::new();

        controller.start_run(config.clone()).unwrap();
        let state = controller.render_into(&mut |patch: ResultPatch| patches.push(patch));

        let expected = colour_scheme_factory(config.colour_scheme, config.max_iterations).colour(7);
        let metrics = controller.metrics().unwrap();
        assert_eq!(state, RunState::Completed);
        assert_eq!(*backend.calls.lock().unwrap(), metrics.total_batches);
        assert_eq!(metrics.pixels_delivered, 48 * 32);
        assert!(
            patches
                .iter()
                .flat_map(|patch| patch.colours.iter())
                .all(|&colour| colour == expected)
        );
    }

    #[test]
    fn idle_controller_yields_nothing() {
        let mut controller = RunController::new();

        assert_eq!(controller.state(), RunState::Idle);
        assert!(controller.patches().next().is_none());
        assert!(controller.metrics().is_none());
    }
}
