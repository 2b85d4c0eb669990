use crate::core::data::colour::Colour;
use crate::core::data::result_patch::ResultPatch;
use crate::core::data::viewport::Dimensions;

fn dimensions_to_buffer_size(dimensions: Dimensions) -> usize {
    dimensions.width as usize * dimensions.height as usize * 3
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PixelBufferError {
    #[error("pixel index {index} outside of {dimensions} buffer")]
    IndexOutsideBounds { index: usize, dimensions: Dimensions },
    #[error("patch [{start}, {stop}) overruns {dimensions} buffer")]
    PatchOutsideBounds {
        start: usize,
        stop: usize,
        dimensions: Dimensions,
    },
    #[error("buffer size {buffer_size} does not match expected size {expected_size}")]
    BoundsMismatch {
        expected_size: usize,
        buffer_size: usize,
    },
}

pub type PixelBufferData = Vec<u8>;

/// Packed RGB frame addressed by flattened pixel index.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    dimensions: Dimensions,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            buffer: vec![0; dimensions_to_buffer_size(dimensions)],
        }
    }

    pub fn from_data(
        dimensions: Dimensions,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let expected_size = dimensions_to_buffer_size(dimensions);

        if expected_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { dimensions, buffer })
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.buffer.len() / 3
    }

    pub fn set_pixel(&mut self, index: usize, colour: Colour) -> Result<(), PixelBufferError> {
        if index >= self.pixel_count() {
            return Err(PixelBufferError::IndexOutsideBounds {
                index,
                dimensions: self.dimensions,
            });
        }

        let offset = index * 3;
        self.buffer[offset..offset + 3].copy_from_slice(&colour.to_array());

        Ok(())
    }

    /// Writes a patch in place. A patch that overruns the buffer is rejected whole.
    pub fn apply_patch(&mut self, patch: &ResultPatch) -> Result<(), PixelBufferError> {
        let range = patch.range();

        if range.stop > self.pixel_count() {
            return Err(PixelBufferError::PatchOutsideBounds {
                start: range.start,
                stop: range.stop,
                dimensions: self.dimensions,
            });
        }

        let target = &mut self.buffer[range.start * 3..range.stop * 3];
        for (pixel, colour) in target.chunks_exact_mut(3).zip(&patch.colours) {
            pixel.copy_from_slice(&colour.to_array());
        }

        Ok(())
    }
}
