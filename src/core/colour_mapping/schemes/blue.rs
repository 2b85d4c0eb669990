use crate::core::colour_mapping::hsl::Hsl;
use crate::core::colour_mapping::kinds::ColourSchemeKind;
use crate::core::colour_mapping::map::{HslFormula, MemoizedScheme};

/// Hue confined to the cyan-to-blue band `[180, 300)`.
#[derive(Debug)]
pub struct BlueFormula;

impl HslFormula for BlueFormula {
    const KIND: ColourSchemeKind = ColourSchemeKind::Blue;

    fn hsl(iterations: u32, max_iterations: u32) -> Hsl {
        let h = (((120.0 * 2.0 * iterations as f64) / max_iterations as f64) % 120.0) + 180.0;
        Hsl::new(h, 90.0, 50.0)
    }
}

pub type BlueScheme = MemoizedScheme<BlueFormula>;
