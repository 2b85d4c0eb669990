use crate::core::data::colour::Colour;
use crate::core::data::tile::IndexRange;

/// A dense run of coloured pixels starting at `start_index`.
///
/// Patches from one run never overlap. Within a worker range they arrive in
/// increasing index order; across ranges the order is arbitrary.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPatch {
    pub generation: u64,
    pub start_index: usize,
    pub colours: Vec<Colour>,
}

impl ResultPatch {
    #[must_use]
    pub fn range(&self) -> IndexRange {
        IndexRange::new(self.start_index, self.start_index + self.colours.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}
