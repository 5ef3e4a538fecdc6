use serde::Serialize;
use tracing::debug;

use crate::color::{hex_to_rgb, Color, ColorError, Hsv};
use crate::names::name_to_hex;

pub const PALETTE_LEN: usize = 12;

/// Slot of a color within a [`Palette`]. The slot fixes how the color was
/// derived from the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PalettePosition {
    Base,
    Analogous60Ccw,
    Analogous30Ccw,
    Analogous30Cw,
    Analogous60Cw,
    Complementary,
    SplitComplementaryCcw,
    SplitComplementaryCw,
    DarkerShade,
    SlightShade,
    LightTint,
    BrightTint,
}

impl PalettePosition {
    pub const ALL: [PalettePosition; PALETTE_LEN] = [
        Self::Base,
        Self::Analogous60Ccw,
        Self::Analogous30Ccw,
        Self::Analogous30Cw,
        Self::Analogous60Cw,
        Self::Complementary,
        Self::SplitComplementaryCcw,
        Self::SplitComplementaryCw,
        Self::DarkerShade,
        Self::SlightShade,
        Self::LightTint,
        Self::BrightTint,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Self::Base => "Base Color",
            Self::Analogous60Ccw => "Analogous Color (-60°)",
            Self::Analogous30Ccw => "Analogous Color (-30°)",
            Self::Analogous30Cw => "Analogous Color (+30°)",
            Self::Analogous60Cw => "Analogous Color (+60°)",
            Self::Complementary => "Complementary Color",
            Self::SplitComplementaryCcw => "Split Complementary (-150°)",
            Self::SplitComplementaryCw => "Split Complementary (+150°)",
            Self::DarkerShade => "Darker Shade (-40%)",
            Self::SlightShade => "Slight Shade (-20%)",
            Self::LightTint => "Light Tint (+20%)",
            Self::BrightTint => "Bright Tint (+40%)",
        }
    }

    pub fn group(self) -> PaletteGroup {
        match self {
            Self::Base => PaletteGroup::Base,
            Self::Analogous60Ccw
            | Self::Analogous30Ccw
            | Self::Analogous30Cw
            | Self::Analogous60Cw => PaletteGroup::Analogous,
            Self::Complementary => PaletteGroup::Complementary,
            Self::SplitComplementaryCcw | Self::SplitComplementaryCw => {
                PaletteGroup::SplitComplementary
            }
            Self::DarkerShade | Self::SlightShade | Self::LightTint | Self::BrightTint => {
                PaletteGroup::ShadesAndTints
            }
        }
    }

    fn derive(self, base: Color, hsv: Hsv) -> Color {
        match self {
            Self::Base => base,
            Self::Analogous60Ccw => hsv.rotate(-60.0).to_rgb(),
            Self::Analogous30Ccw => hsv.rotate(-30.0).to_rgb(),
            Self::Analogous30Cw => hsv.rotate(30.0).to_rgb(),
            Self::Analogous60Cw => hsv.rotate(60.0).to_rgb(),
            Self::Complementary => hsv.rotate(180.0).to_rgb(),
            Self::SplitComplementaryCcw => hsv.rotate(-150.0).to_rgb(),
            Self::SplitComplementaryCw => hsv.rotate(150.0).to_rgb(),
            Self::DarkerShade => hsv.with_value_offset(-0.4).to_rgb(),
            Self::SlightShade => hsv.with_value_offset(-0.2).to_rgb(),
            Self::LightTint => hsv.with_value_offset(0.2).to_rgb(),
            Self::BrightTint => hsv.with_value_offset(0.4).to_rgb(),
        }
    }
}

/// Contiguous run of palette slots drawn together under one title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteGroup {
    Base,
    Analogous,
    Complementary,
    SplitComplementary,
    ShadesAndTints,
}

impl PaletteGroup {
    pub const ALL: [PaletteGroup; 5] = [
        Self::Base,
        Self::Analogous,
        Self::Complementary,
        Self::SplitComplementary,
        Self::ShadesAndTints,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Analogous => "Analogous",
            Self::Complementary => "Complementary",
            Self::SplitComplementary => "Split Complementary",
            Self::ShadesAndTints => "Shades & Tints",
        }
    }

    /// Index range of this group's slots within a palette.
    pub fn range(self) -> std::ops::Range<usize> {
        match self {
            Self::Base => 0..1,
            Self::Analogous => 1..5,
            Self::Complementary => 5..6,
            Self::SplitComplementary => 6..8,
            Self::ShadesAndTints => 8..12,
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("unknown color name '{0}'")]
    UnknownName(String),
    #[error(transparent)]
    Color(#[from] ColorError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: [Color; PALETTE_LEN],
}

impl Palette {
    pub fn from_base(base: Color) -> Self {
        let hsv = base.to_hsv();
        Self {
            colors: PalettePosition::ALL.map(|position| position.derive(base, hsv)),
        }
    }

    /// Accepts `#rrggbb` or a CSS color keyword (any case).
    pub fn from_seed(seed: &str) -> Result<Self, PaletteError> {
        let base = if seed.starts_with('#') {
            hex_to_rgb(seed)?
        } else {
            name_to_hex(seed).ok_or_else(|| PaletteError::UnknownName(seed.to_string()))?
        };
        Ok(Self::from_base(base))
    }

    pub fn get(&self, position: PalettePosition) -> Color {
        self.colors[position as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PalettePosition, Color)> + '_ {
        PalettePosition::ALL.into_iter().zip(self.colors.iter().copied())
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(|color| color.to_hex()).collect()
    }
}

/// Builds the palette for `seed`, or `None` when the seed is not a usable
/// color.
pub fn generate_palette(seed: &str) -> Option<Palette> {
    match Palette::from_seed(seed) {
        Ok(palette) => Some(palette),
        Err(err) => {
            debug!(%seed, %err, "rejected palette seed");
            None
        }
    }
}
