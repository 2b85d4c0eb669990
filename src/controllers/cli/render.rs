use std::path::Path;

use tracing::info;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::run::config::{ConfigurationError, RunConfig};
use crate::controllers::run::controller::RunController;
use crate::controllers::run::run::{RunMetrics, RunState};
use crate::core::data::pixel_buffer::PixelBuffer;

#[derive(Debug, thiserror::Error)]
pub enum CliRenderError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("run ended as {0:?} before the frame was complete")]
    Incomplete(RunState),
}

/// Renders one frame to completion and hands it to a file presenter.
pub struct CliRenderController<P: FilePresenterPort> {
    presenter: P,
    config: RunConfig,
    controller: RunController,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> CliRenderController<P> {
    pub fn new(presenter: P, config: RunConfig) -> Self {
        Self {
            presenter,
            config,
            controller: RunController::new(),
            buffer: None,
        }
    }

    /// Replaces the run controller, e.g. to inject an HTTP client.
    #[must_use]
    pub fn with_run_controller(mut self, controller: RunController) -> Self {
        self.controller = controller;
        self
    }

    pub fn generate(&mut self) -> Result<RunMetrics, CliRenderError> {
        let dimensions = self.config.viewport.dimensions();

        info!(
            strategy = self.config.strategy.config_name(),
            colour_scheme = self.config.colour_scheme.config_name(),
            %dimensions,
            max_iterations = self.config.max_iterations,
            workers = self.config.num_workers,
            "rendering mandelbrot set"
        );

        // The frame buffer is this controller's surface.
        self.controller.live_viewport().set_dimensions(dimensions);
        self.controller.start_run(self.config.clone())?;

        let mut buffer = PixelBuffer::new(dimensions);
        let state = self.controller.render_into(&mut buffer);
        let metrics = self
            .controller
            .metrics()
            .filter(|_| state == RunState::Completed)
            .ok_or(CliRenderError::Incomplete(state))?;

        self.buffer = Some(buffer);

        Ok(metrics)
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        if let Some(buffer) = &self.buffer {
            self.presenter.present(buffer, filepath.as_ref())?;
            info!(path = %filepath.as_ref().display(), "saved frame");
        }

        Ok(())
    }
}
