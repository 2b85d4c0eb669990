use std::time::Duration;

use crate::core::colour_mapping::kinds::ColourSchemeKind;
use crate::core::data::viewport::{Dimensions, Viewport, ViewportError};
use crate::core::executors::kinds::ExecutorKind;
use crate::core::executors::remote::backend::RemoteLambda;

pub const MAX_WORKERS: usize = 256;
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("max_iterations must be at least 1")]
    ZeroMaxIterations,
    #[error("max_iterations {0} leaves no room for the never-escaped count")]
    MaxIterationsTooLarge(u32),
    #[error("num_workers must be at least 1")]
    ZeroWorkers,
    #[error("num_workers {requested} exceeds the limit of {max}")]
    TooManyWorkers { requested: usize, max: usize },
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error("remote strategy needs an endpoint")]
    MissingRemoteEndpoint,
    #[error("{0} strategy is not available in this build")]
    StrategyUnavailable(ExecutorKind),
    #[error("could not build HTTP client: {0}")]
    RemoteClient(String),
    #[error("run is configured for {configured}, surface is {live}")]
    ViewportMismatch { configured: Dimensions, live: Dimensions },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub lambda: RemoteLambda,
    pub timeout: Duration,
}

impl RemoteConfig {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            lambda: RemoteLambda::default(),
            timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

/// Everything a run needs. Captured by value when the run starts; later edits
/// only take effect through a new run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub viewport: Viewport,
    pub max_iterations: u32,
    pub strategy: ExecutorKind,
    pub num_workers: usize,
    /// Rows per batch. `0` sends each worker range as a single batch.
    pub batch_size: u32,
    pub colour_scheme: ColourSchemeKind,
    pub remote: Option<RemoteConfig>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            max_iterations: 500,
            strategy: ExecutorKind::default(),
            num_workers: 1,
            batch_size: 50,
            colour_scheme: ColourSchemeKind::default(),
            remote: None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_iterations == 0 {
            return Err(ConfigurationError::ZeroMaxIterations);
        }

        if self.max_iterations == u32::MAX {
            return Err(ConfigurationError::MaxIterationsTooLarge(self.max_iterations));
        }

        if self.num_workers == 0 {
            return Err(ConfigurationError::ZeroWorkers);
        }

        if self.num_workers > MAX_WORKERS {
            return Err(ConfigurationError::TooManyWorkers {
                requested: self.num_workers,
                max: MAX_WORKERS,
            });
        }

        if self.strategy == ExecutorKind::Remote
            && self
                .remote
                .as_ref()
                .is_none_or(|remote| remote.endpoint.trim().is_empty())
        {
            return Err(ConfigurationError::MissingRemoteEndpoint);
        }

        Ok(())
    }

    /// Same run, zoomed by `factor` about pixel `(x, y)`.
    pub fn zoomed_at(&self, x: f64, y: f64, factor: f64) -> Result<Self, ConfigurationError> {
        Ok(Self {
            viewport: self.viewport.zoomed_at(x, y, factor)?,
            ..self.clone()
        })
    }

    pub fn resized(&self, pixel_width: u32, pixel_height: u32) -> Result<Self, ConfigurationError> {
        Ok(Self {
            viewport: self.viewport.resized(pixel_width, pixel_height)?,
            ..self.clone()
        })
    }
}
