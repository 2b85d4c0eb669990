use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::compute_iterations::errors::ComputeError;
use crate::core::data::tile::Tile;

/// Single-tile compute contract shared by every backend.
///
/// Implementations return one iteration count per index of `[tile.start, tile.stop)`,
/// in index order.
pub trait ComputeBackend: Send + Sync {
    fn name(&self) -> &str;

    fn compute(&self, tile: &Tile, cancel: &dyn CancelToken) -> Result<Vec<u32>, ComputeError>;
}
