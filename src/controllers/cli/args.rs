use std::path::PathBuf;

use clap::Parser;

use crate::controllers::run::config::{ConfigurationError, RemoteConfig, RunConfig};
use crate::core::colour_mapping::kinds::ColourSchemeKind;
use crate::core::data::viewport::Viewport;
use crate::core::executors::kinds::ExecutorKind;
use crate::core::executors::remote::backend::RemoteLambda;

/// Render one Mandelbrot frame to a PPM file.
#[derive(Debug, Clone, Parser)]
#[command(name = "fractal_stream", version, long_about = None)]
pub struct CliArgs {
    /// Compute strategy: serial, workerPool, batchedFeedback, gpu or remote
    #[arg(short, long, default_value = "serial")]
    pub strategy: ExecutorKind,

    /// Colour scheme: rainbow, blue or blue2
    #[arg(short, long, default_value = "rainbow")]
    pub colour_scheme: ColourSchemeKind,

    /// Frame width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Pixels per unit of the complex plane
    #[arg(short, long, default_value_t = 200.0)]
    pub zoom: f64,

    /// Horizontal pan in pixels
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pan_x: f64,

    /// Vertical pan in pixels
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pan_y: f64,

    #[arg(short = 'i', long, default_value_t = 500)]
    pub max_iterations: u32,

    /// Worker ranges (default: one per core for threaded strategies, else 1)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Rows per batch; 0 sends each range as one batch
    #[arg(short, long, default_value_t = 50)]
    pub batch_size: u32,

    /// Base URL of the remote iteration service
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Remote function to call
    #[arg(long, default_value = "getIterations")]
    pub lambda: RemoteLambda,

    #[arg(short, long, default_value = "output/mandelbrot.ppm")]
    pub output: PathBuf,
}

impl CliArgs {
    pub fn run_config(&self) -> Result<RunConfig, ConfigurationError> {
        let viewport = Viewport::new(self.width, self.height, self.pan_x, self.pan_y, self.zoom)?;

        let num_workers = self.workers.unwrap_or_else(|| {
            if self.strategy.is_threaded() {
                std::thread::available_parallelism().map_or(4, |n| n.get())
            } else {
                1
            }
        });

        let remote = self.endpoint.as_ref().map(|endpoint| RemoteConfig {
            lambda: self.lambda,
            ..RemoteConfig::new(endpoint.as_str())
        });

        let config = RunConfig {
            viewport,
            max_iterations: self.max_iterations,
            strategy: self.strategy,
            num_workers,
            batch_size: self.batch_size,
            colour_scheme: self.colour_scheme,
            remote,
        };
        config.validate()?;

        Ok(config)
    }
}
