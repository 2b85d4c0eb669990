use crate::core::colour_mapping::kinds::ColourSchemeKind;
use crate::core::colour_mapping::map::ColourScheme;
use crate::core::colour_mapping::schemes::{
    blue::BlueScheme, blue2::Blue2Scheme, rainbow::RainbowScheme,
};

/// Builds a fresh scheme with an empty cache. Call once per run.
#[must_use]
pub fn colour_scheme_factory(
    kind: ColourSchemeKind,
    max_iterations: u32,
) -> Box<dyn ColourScheme> {
    match kind {
        ColourSchemeKind::Rainbow => Box::new(RainbowScheme::new(max_iterations)),
        ColourSchemeKind::Blue => Box::new(BlueScheme::new(max_iterations)),
        ColourSchemeKind::Blue2 => Box::new(Blue2Scheme::new(max_iterations)),
    }
}
