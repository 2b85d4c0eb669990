use tracing::warn;

use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::result_patch::ResultPatch;

/// Consumer of finished patches. Called from the controller's thread only.
pub trait PatchSink {
    fn deliver(&mut self, patch: ResultPatch);
}

impl PatchSink for PixelBuffer {
    fn deliver(&mut self, patch: ResultPatch) {
        if let Err(err) = self.apply_patch(&patch) {
            warn!(generation = patch.generation, error = %err, "dropping patch");
        }
    }
}

impl<F> PatchSink for F
where
    F: FnMut(ResultPatch),
{
    fn deliver(&mut self, patch: ResultPatch) {
        self(patch);
    }
}
