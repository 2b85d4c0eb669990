use crate::core::colour_mapping::hsl::Hsl;
use crate::core::colour_mapping::kinds::ColourSchemeKind;
use crate::core::colour_mapping::map::{HslFormula, MemoizedScheme};

/// Full hue sweep, twice over the iteration budget.
#[derive(Debug)]
pub struct RainbowFormula;

impl HslFormula for RainbowFormula {
    const KIND: ColourSchemeKind = ColourSchemeKind::Rainbow;

    fn hsl(iterations: u32, max_iterations: u32) -> Hsl {
        let h = ((360.0 * 2.0 * iterations as f64) / max_iterations as f64) % 360.0;
        Hsl::new(h, 90.0, 50.0)
    }
}

pub type RainbowScheme = MemoizedScheme<RainbowFormula>;
