mod controllers;
mod core;
mod presenters;
mod storage;

pub use crate::controllers::cli::args::CliArgs;
pub use crate::controllers::cli::render::{CliRenderController, CliRenderError};
pub use crate::controllers::ports::file_presenter::FilePresenterPort;
pub use crate::controllers::run::config::{ConfigurationError, RemoteConfig, RunConfig};
pub use crate::controllers::run::controller::{Patches, RunController};
pub use crate::controllers::run::delivery::StaleDelivery;
pub use crate::controllers::run::ports::patch_sink::PatchSink;
pub use crate::controllers::run::run::{RunMetrics, RunState};
pub use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
pub use crate::core::actions::compute_iterations::compute_iterations::{
    compute_iterations, escape_iterations,
};
pub use crate::core::actions::compute_iterations::compute_iterations_parallel_rayon::compute_iterations_parallel_rayon;
pub use crate::core::actions::compute_iterations::errors::{ComputeError, ComputeFailure};
pub use crate::core::actions::compute_iterations::ports::compute_backend::ComputeBackend;
pub use crate::core::colour_mapping::factory::colour_scheme_factory;
pub use crate::core::colour_mapping::kinds::{ColourSchemeKind, UnknownColourScheme};
pub use crate::core::colour_mapping::map::ColourScheme;
pub use crate::core::data::colour::Colour;
pub use crate::core::data::live_viewport::LiveViewport;
pub use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
pub use crate::core::data::result_patch::ResultPatch;
pub use crate::core::data::tile::{IndexRange, Tile};
pub use crate::core::data::viewport::{Dimensions, Viewport, ViewportError};
pub use crate::core::executors::kinds::{ExecutorKind, UnknownExecutorKind};
pub use crate::core::executors::remote::backend::{RemoteBackend, RemoteLambda};
pub use crate::core::executors::remote::client::HttpClient;
#[cfg(feature = "remote")]
pub use crate::core::executors::remote::client::ReqwestClient;
pub use crate::presenters::file::ppm::PpmFilePresenter;
pub use crate::storage::write_ppm::write_ppm;
