use rayon::prelude::*;

use crate::core::actions::cancellation::{
    CancelToken, Cancelled, NeverCancel, CANCEL_CHECK_INTERVAL_PIXELS,
};
use crate::core::actions::compute_iterations::compute_iterations::escape_iterations;
use crate::core::data::tile::Tile;

/// Computes a tile on rayon's work-stealing pool.
///
/// Output is identical to [`compute_iterations`](super::compute_iterations::compute_iterations).
/// For cancel-aware computation, use [`compute_iterations_parallel_rayon_cancelable`].
#[must_use]
pub fn compute_iterations_parallel_rayon(tile: &Tile) -> Vec<u32> {
    match compute_iterations_parallel_rayon_cancelable(tile, &NeverCancel) {
        Ok(counts) => counts,
        Err(Cancelled) => unreachable!("NeverCancel token should never signal cancellation"),
    }
}

/// Computes a tile in parallel chunks of [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels,
/// polling the token at the start of each chunk.
///
/// Returns [`Cancelled`] as soon as any chunk observes cancellation; partial
/// results are dropped.
pub fn compute_iterations_parallel_rayon_cancelable<C>(
    tile: &Tile,
    cancel: &C,
) -> Result<Vec<u32>, Cancelled>
where
    C: CancelToken + ?Sized,
{
    let chunk_count = tile.len().div_ceil(CANCEL_CHECK_INTERVAL_PIXELS);

    let chunks: Result<Vec<Vec<u32>>, Cancelled> = (0..chunk_count)
        .into_par_iter()
        .map(|chunk| {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }

            let start = tile.start + chunk * CANCEL_CHECK_INTERVAL_PIXELS;
            let stop = (start + CANCEL_CHECK_INTERVAL_PIXELS).min(tile.stop);

            Ok((start..stop)
                .map(|index| {
                    let (x0, y0) = tile.plane_coords(index);
                    escape_iterations(x0, y0, tile.max_iterations)
                })
                .collect())
        })
        .collect();

    // Flatten chunks back into index order
    chunks.map(|c| c.into_iter().flatten().collect())
}
