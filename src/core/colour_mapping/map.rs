use std::collections::HashMap;
use std::marker::PhantomData;

use crate::core::colour_mapping::hsl::Hsl;
use crate::core::colour_mapping::kinds::ColourSchemeKind;
use crate::core::data::colour::Colour;

/// Maps an iteration count to a colour for one run.
///
/// Counts at or above the run's `max_iterations` are interior points and map to black.
pub trait ColourScheme: Send {
    fn kind(&self) -> ColourSchemeKind;

    fn colour(&mut self, iterations: u32) -> Colour;

    fn display_name(&self) -> &str {
        self.kind().display_name()
    }
}

/// The pure hue/lightness rule behind a scheme.
pub trait HslFormula: Send {
    const KIND: ColourSchemeKind;

    fn hsl(iterations: u32, max_iterations: u32) -> Hsl;
}

/// Wraps a formula with a private per-instance cache.
///
/// The cache only ever holds counts below `max_iterations`, so it is bounded
/// by the iteration budget.
#[derive(Debug)]
pub struct MemoizedScheme<F> {
    max_iterations: u32,
    cache: HashMap<u32, Colour>,
    formula: PhantomData<F>,
}

impl<F: HslFormula> MemoizedScheme<F> {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            cache: HashMap::new(),
            formula: PhantomData,
        }
    }

    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl<F: HslFormula> ColourScheme for MemoizedScheme<F> {
    fn kind(&self) -> ColourSchemeKind {
        F::KIND
    }

    fn colour(&mut self, iterations: u32) -> Colour {
        if iterations >= self.max_iterations {
            return Colour::BLACK;
        }

        let max_iterations = self.max_iterations;
        *self
            .cache
            .entry(iterations)
            .or_insert_with(|| F::hsl(iterations, max_iterations).to_rgb())
    }
}
