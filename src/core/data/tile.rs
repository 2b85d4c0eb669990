use crate::core::data::viewport::Viewport;

/// Half-open range `[start, stop)` over the flattened pixel index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    pub start: usize,
    pub stop: usize,
}

impl IndexRange {
    #[must_use]
    pub const fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One unit of compute work: an index range plus everything needed to map it
/// onto the complex plane.
///
/// Field names follow the compute-backend wire contract, so remote backends can
/// serialise a tile without consulting the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub start: usize,
    pub stop: usize,
    pub width: u32,
    pub offset_x: f64,
    pub offset_y: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub max_iterations: u32,
}

impl Tile {
    #[must_use]
    pub fn for_range(viewport: &Viewport, range: IndexRange, max_iterations: u32) -> Self {
        Self {
            start: range.start,
            stop: range.stop,
            width: viewport.pixel_width(),
            offset_x: viewport.offset_x(),
            offset_y: viewport.offset_y(),
            pan_x: viewport.pan_x(),
            pan_y: viewport.pan_y(),
            zoom: viewport.zoom(),
            max_iterations,
        }
    }

    #[must_use]
    pub fn range(&self) -> IndexRange {
        IndexRange::new(self.start, self.stop)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.range().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range().is_empty()
    }

    /// Complex-plane coordinate `(x0, y0)` of a flattened pixel index.
    #[inline]
    #[must_use]
    pub fn plane_coords(&self, index: usize) -> (f64, f64) {
        let width = self.width as usize;
        let x = (index % width) as f64;
        let y = (index / width) as f64;

        (
            (x + self.offset_x + self.pan_x) / self.zoom,
            (y + self.offset_y + self.pan_y) / self.zoom,
        )
    }

    /// Same tile context over a narrower range.
    #[must_use]
    pub fn with_range(&self, range: IndexRange) -> Self {
        Self {
            start: range.start,
            stop: range.stop,
            ..*self
        }
    }
}
