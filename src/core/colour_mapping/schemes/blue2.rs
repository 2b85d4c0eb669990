use crate::core::colour_mapping::hsl::Hsl;
use crate::core::colour_mapping::kinds::ColourSchemeKind;
use crate::core::colour_mapping::map::{HslFormula, MemoizedScheme};

/// Fixed blue hue, lightness ramps from black and wraps at 75%.
#[derive(Debug)]
pub struct Blue2Formula;

impl HslFormula for Blue2Formula {
    const KIND: ColourSchemeKind = ColourSchemeKind::Blue2;

    fn hsl(iterations: u32, max_iterations: u32) -> Hsl {
        let l = ((75.0 * 2.0 * iterations as f64) / max_iterations as f64) % 75.0;
        Hsl::new(220.0, 90.0, l)
    }
}

pub type Blue2Scheme = MemoizedScheme<Blue2Formula>;
