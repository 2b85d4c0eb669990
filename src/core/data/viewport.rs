use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ViewportError {
    #[error("viewport size must be positive: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("zoom must be finite and greater than zero: {0}")]
    InvalidZoom(f64),
    #[error("pan must be finite: ({pan_x}, {pan_y})")]
    InvalidPan { pan_x: f64, pan_y: f64 },
}

/// Pixel dimensions of a surface, compared at delivery time to detect resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub(crate) const fn pack(self) -> u64 {
        ((self.width as u64) << 32) | self.height as u64
    }

    #[must_use]
    pub(crate) const fn unpack(packed: u64) -> Self {
        Self {
            width: (packed >> 32) as u32,
            height: packed as u32,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Affine mapping from the pixel grid onto the complex plane.
///
/// Pixel `(x, y)` maps to `((x - width/2 + pan_x) / zoom, (y - height/2 + pan_y) / zoom)`.
/// A viewport is a value: panning, zooming or resizing produces a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pixel_width: u32,
    pixel_height: u32,
    pan_x: f64,
    pan_y: f64,
    zoom: f64,
}

impl Default for Viewport {
    /// 800x600 pixels centred on the origin at 200 pixels per unit.
    fn default() -> Self {
        Self {
            pixel_width: 800,
            pixel_height: 600,
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 200.0,
        }
    }
}

impl Viewport {
    pub fn new(
        pixel_width: u32,
        pixel_height: u32,
        pan_x: f64,
        pan_y: f64,
        zoom: f64,
    ) -> Result<Self, ViewportError> {
        if pixel_width == 0 || pixel_height == 0 {
            return Err(ViewportError::InvalidSize {
                width: pixel_width,
                height: pixel_height,
            });
        }

        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(ViewportError::InvalidZoom(zoom));
        }

        if !pan_x.is_finite() || !pan_y.is_finite() {
            return Err(ViewportError::InvalidPan { pan_x, pan_y });
        }

        Ok(Self {
            pixel_width,
            pixel_height,
            pan_x,
            pan_y,
            zoom,
        })
    }

    #[must_use]
    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    #[must_use]
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    #[must_use]
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    #[must_use]
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.pixel_width, self.pixel_height)
    }

    #[must_use]
    pub fn total_pixels(&self) -> usize {
        self.pixel_width as usize * self.pixel_height as usize
    }

    #[must_use]
    pub fn offset_x(&self) -> f64 {
        -(self.pixel_width as f64) / 2.0
    }

    #[must_use]
    pub fn offset_y(&self) -> f64 {
        -(self.pixel_height as f64) / 2.0
    }

    /// Complex-plane coordinate of a flattened pixel index.
    #[must_use]
    pub fn pixel_to_plane(&self, index: usize) -> (f64, f64) {
        let width = self.pixel_width as usize;
        let x = (index % width) as f64;
        let y = (index / width) as f64;

        (
            (x + self.offset_x() + self.pan_x) / self.zoom,
            (y + self.offset_y() + self.pan_y) / self.zoom,
        )
    }

    /// Re-centres on the plane point under pixel `(x, y)` and scales zoom by `factor`.
    ///
    /// A factor of `2.0` zooms in, `0.5` zooms out.
    pub fn zoomed_at(&self, x: f64, y: f64, factor: f64) -> Result<Self, ViewportError> {
        let pan_x = (x + self.offset_x() + self.pan_x) * factor;
        let pan_y = (y + self.offset_y() + self.pan_y) * factor;

        Self::new(
            self.pixel_width,
            self.pixel_height,
            pan_x,
            pan_y,
            self.zoom * factor,
        )
    }

    pub fn resized(&self, pixel_width: u32, pixel_height: u32) -> Result<Self, ViewportError> {
        Self::new(pixel_width, pixel_height, self.pan_x, self.pan_y, self.zoom)
    }
}
