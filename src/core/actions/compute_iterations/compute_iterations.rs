use crate::core::data::tile::Tile;

/// Escape-time count for `z <- z^2 + c` with `c = (x0, y0)`.
///
/// The bound is inclusive, so the result lies in `[1, max_iterations + 1]`;
/// `max_iterations + 1` marks a point that never escaped. The update order and
/// the squared-radius test against 4 are fixed: changing either shifts pixels.
#[inline]
#[must_use]
pub fn escape_iterations(x0: f64, y0: f64, max_iterations: u32) -> u32 {
    let mut rx = 0.0_f64;
    let mut ry = 0.0_f64;
    let mut rxsqr = 0.0_f64;
    let mut rysqr = 0.0_f64;
    let mut iterations: u32 = 0;

    while iterations <= max_iterations && rxsqr + rysqr <= 4.0 {
        ry = (rx + rx) * ry + y0;
        rx = rxsqr - rysqr + x0;
        rysqr = ry * ry;
        rxsqr = rx * rx;
        iterations += 1;
    }

    iterations
}

/// Iteration counts for every index of the tile, aligned with `[start, stop)`.
#[must_use]
pub fn compute_iterations(tile: &Tile) -> Vec<u32> {
    (tile.start..tile.stop)
        .map(|index| {
            let (x0, y0) = tile.plane_coords(index);
            escape_iterations(x0, y0, tile.max_iterations)
        })
        .collect()
}
