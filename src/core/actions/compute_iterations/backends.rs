use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::compute_iterations::compute_iterations::compute_iterations;
use crate::core::actions::compute_iterations::compute_iterations_parallel_rayon::compute_iterations_parallel_rayon_cancelable;
use crate::core::actions::compute_iterations::errors::ComputeError;
use crate::core::actions::compute_iterations::ports::compute_backend::ComputeBackend;
use crate::core::data::tile::Tile;

/// Runs the escape-time kernel on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelBackend;

impl ComputeBackend for KernelBackend {
    fn name(&self) -> &str {
        "kernel"
    }

    fn compute(&self, tile: &Tile, _cancel: &dyn CancelToken) -> Result<Vec<u32>, ComputeError> {
        Ok(compute_iterations(tile))
    }
}

/// Spreads each tile across rayon's global pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceleratedBackend;

impl ComputeBackend for AcceleratedBackend {
    fn name(&self) -> &str {
        "rayon"
    }

    fn compute(&self, tile: &Tile, cancel: &dyn CancelToken) -> Result<Vec<u32>, ComputeError> {
        Ok(compute_iterations_parallel_rayon_cancelable(tile, cancel)?)
    }
}
