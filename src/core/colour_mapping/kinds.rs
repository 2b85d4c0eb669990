use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColourSchemeKind {
    #[default]
    Rainbow,
    Blue,
    Blue2,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown colour scheme '{0}' (expected rainbow, blue or blue2)")]
pub struct UnknownColourScheme(pub String);

impl ColourSchemeKind {
    pub const ALL: &'static [Self] = &[Self::Rainbow, Self::Blue, Self::Blue2];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Rainbow => "Spectrum",
            Self::Blue => "Blue",
            Self::Blue2 => "Blue2",
        }
    }

    #[must_use]
    pub const fn config_name(self) -> &'static str {
        match self {
            Self::Rainbow => "rainbow",
            Self::Blue => "blue",
            Self::Blue2 => "blue2",
        }
    }
}

impl std::fmt::Display for ColourSchemeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl FromStr for ColourSchemeKind {
    type Err = UnknownColourScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.config_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownColourScheme(s.to_owned()))
    }
}
