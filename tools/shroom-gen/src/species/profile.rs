//! Per-species parameter tables
//!
//! A profile lists its parameters in draw order: shape parameters in the
//! order the sculpting plan consumes them, then the color parameters its
//! appearance recipe consumes. Reordering entries changes every value drawn
//! after the moved entry.

use super::Species;
use crate::material::recipes::{
    BandsRecipe, BaseColor, CapRecipe, Channel, DotsRecipe, Jitter, Recipe, SolidRecipe,
};
use crate::material::{Hsv, Rgb};
use serde::{Deserialize, Serialize};

/// Name of a sampled parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    // Shape
    StemThickness,
    StemBaseThickness,
    StemBaseOffset,
    CapHeight,
    CapWidth,
    CapTopWidth,
    OverallScale,

    // Solid color perturbation
    StemValueJitter,
    CapHueJitter,
    CapValueJitter,
    CapRedJitter,
    CapGreenJitter,
    CapBlueJitter,

    // Cellular dot pattern
    DotRandomness,
    DotThreshold,
    CapGreen,

    // Wave band pattern
    WaveStretch,
    WaveScale,
    WaveDistortion,
    InkBias,
    ShadeValue,
}

impl ParamKey {
    /// Snake case name, matching the serialized form
    pub fn name(self) -> &'static str {
        match self {
            ParamKey::StemThickness => "stem_thickness",
            ParamKey::StemBaseThickness => "stem_base_thickness",
            ParamKey::StemBaseOffset => "stem_base_offset",
            ParamKey::CapHeight => "cap_height",
            ParamKey::CapWidth => "cap_width",
            ParamKey::CapTopWidth => "cap_top_width",
            ParamKey::OverallScale => "overall_scale",
            ParamKey::StemValueJitter => "stem_value_jitter",
            ParamKey::CapHueJitter => "cap_hue_jitter",
            ParamKey::CapValueJitter => "cap_value_jitter",
            ParamKey::CapRedJitter => "cap_red_jitter",
            ParamKey::CapGreenJitter => "cap_green_jitter",
            ParamKey::CapBlueJitter => "cap_blue_jitter",
            ParamKey::DotRandomness => "dot_randomness",
            ParamKey::DotThreshold => "dot_threshold",
            ParamKey::CapGreen => "cap_green",
            ParamKey::WaveStretch => "wave_stretch",
            ParamKey::WaveScale => "wave_scale",
            ParamKey::WaveDistortion => "wave_distortion",
            ParamKey::InkBias => "ink_bias",
            ParamKey::ShadeValue => "shade_value",
        }
    }

    /// Whether the sculpting engine (rather than the material builder) reads this key
    pub fn is_shape(self) -> bool {
        matches!(
            self,
            ParamKey::StemThickness
                | ParamKey::StemBaseThickness
                | ParamKey::StemBaseOffset
                | ParamKey::CapHeight
                | ParamKey::CapWidth
                | ParamKey::CapTopWidth
                | ParamKey::OverallScale
        )
    }
}

/// How a parameter value is obtained
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamSpec {
    /// Uniform draw from the closed interval `[min, max]`
    Uniform { min: f32, max: f32 },
    /// Fixed value; consumes no draw from the stream
    Constant(f32),
}

impl ParamSpec {
    const fn uniform(min: f32, max: f32) -> Self {
        ParamSpec::Uniform { min, max }
    }

    /// Closed interval the value must lie in
    pub fn bounds(self) -> (f32, f32) {
        match self {
            ParamSpec::Uniform { min, max } => (min, max),
            ParamSpec::Constant(v) => (v, v),
        }
    }

    pub fn contains(self, value: f32) -> bool {
        let (min, max) = self.bounds();
        value >= min && value <= max
    }
}

/// Immutable parameter table and appearance recipe of one species
#[derive(Debug)]
pub struct SpeciesProfile {
    pub species: Species,
    /// Parameters in draw order
    pub params: &'static [(ParamKey, ParamSpec)],
    pub recipe: Recipe,
}

impl SpeciesProfile {
    /// Profile for a species
    pub fn of(species: Species) -> &'static SpeciesProfile {
        match species {
            Species::Boletus => &BOLETUS,
            Species::CrestedInkling => &CRESTED_INKLING,
            Species::DrabBonnet => &DRAB_BONNET,
            Species::Toadstool => &TOADSTOOL,
        }
    }

    /// Sampling spec for a key, if this profile defines it
    pub fn spec(&self, key: ParamKey) -> Option<ParamSpec> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, spec)| *spec)
    }

    /// Whether `value` is a legal sample for `key` under this profile
    pub fn contains(&self, key: ParamKey, value: f32) -> bool {
        self.spec(key).is_some_and(|spec| spec.contains(value))
    }
}

use ParamKey::*;

static BOLETUS: SpeciesProfile = SpeciesProfile {
    species: Species::Boletus,
    params: &[
        (StemThickness, ParamSpec::uniform(0.01, 0.1)),
        (StemBaseThickness, ParamSpec::uniform(1.8, 2.8)),
        (StemBaseOffset, ParamSpec::uniform(0.0, 0.25)),
        (CapHeight, ParamSpec::uniform(0.7, 0.9)),
        (CapWidth, ParamSpec::uniform(1.2, 2.1)),
        (CapTopWidth, ParamSpec::Constant(1.0)),
        (OverallScale, ParamSpec::uniform(0.036, 0.09)),
        (StemValueJitter, ParamSpec::uniform(-0.08, 0.08)),
        (CapHueJitter, ParamSpec::uniform(-6.0, 6.0)),
        (CapValueJitter, ParamSpec::uniform(-0.1, 0.1)),
    ],
    recipe: Recipe {
        stem: SolidRecipe {
            base: BaseColor::Hsv(Hsv::new(36.0, 0.30, 0.86)),
            jitter: &[Jitter::new(Channel::Value, StemValueJitter)],
        },
        cap: CapRecipe::Solid(SolidRecipe {
            base: BaseColor::Hsv(Hsv::new(24.0, 0.62, 0.42)),
            jitter: &[
                Jitter::new(Channel::Hue, CapHueJitter),
                Jitter::new(Channel::Value, CapValueJitter),
            ],
        }),
    },
};

static CRESTED_INKLING: SpeciesProfile = SpeciesProfile {
    species: Species::CrestedInkling,
    params: &[
        (StemThickness, ParamSpec::uniform(0.30, 0.32)),
        (StemBaseThickness, ParamSpec::Constant(1.2)),
        (StemBaseOffset, ParamSpec::Constant(0.0)),
        (CapHeight, ParamSpec::uniform(1.0, 2.0)),
        (CapWidth, ParamSpec::uniform(0.4, 0.7)),
        (CapTopWidth, ParamSpec::Constant(0.8)),
        (OverallScale, ParamSpec::uniform(0.045, 0.09)),
        (StemValueJitter, ParamSpec::uniform(-0.05, 0.03)),
        (WaveStretch, ParamSpec::uniform(1.5, 3.0)),
        (WaveScale, ParamSpec::uniform(4.0, 9.0)),
        (WaveDistortion, ParamSpec::uniform(2.0, 8.0)),
        (InkBias, ParamSpec::uniform(-0.15, 0.15)),
        (ShadeValue, ParamSpec::uniform(0.55, 0.75)),
    ],
    recipe: Recipe {
        stem: SolidRecipe {
            base: BaseColor::Rgb(Rgb::new(0.95, 0.94, 0.90)),
            jitter: &[Jitter::new(Channel::All, StemValueJitter)],
        },
        cap: CapRecipe::Bands(BandsRecipe {
            stretch: WaveStretch,
            scale: WaveScale,
            distortion: WaveDistortion,
            bias: InkBias,
            shade_value: ShadeValue,
        }),
    },
};

static DRAB_BONNET: SpeciesProfile = SpeciesProfile {
    species: Species::DrabBonnet,
    params: &[
        (StemThickness, ParamSpec::uniform(0.30, 0.35)),
        (StemBaseThickness, ParamSpec::Constant(1.3)),
        (StemBaseOffset, ParamSpec::uniform(0.0, 0.5)),
        (CapHeight, ParamSpec::uniform(-0.1, 0.8)),
        (CapWidth, ParamSpec::Constant(1.0)),
        (CapTopWidth, ParamSpec::Constant(0.5)),
        (OverallScale, ParamSpec::uniform(0.018, 0.0405)),
        (StemValueJitter, ParamSpec::uniform(-0.06, 0.06)),
        (CapRedJitter, ParamSpec::uniform(-0.05, 0.05)),
        (CapGreenJitter, ParamSpec::uniform(-0.05, 0.05)),
        (CapBlueJitter, ParamSpec::uniform(-0.05, 0.05)),
    ],
    recipe: Recipe {
        stem: SolidRecipe {
            base: BaseColor::Hsv(Hsv::new(30.0, 0.18, 0.62)),
            jitter: &[Jitter::new(Channel::Value, StemValueJitter)],
        },
        cap: CapRecipe::Solid(SolidRecipe {
            base: BaseColor::Rgb(Rgb::new(0.45, 0.38, 0.32)),
            jitter: &[
                Jitter::new(Channel::Red, CapRedJitter),
                Jitter::new(Channel::Green, CapGreenJitter),
                Jitter::new(Channel::Blue, CapBlueJitter),
            ],
        }),
    },
};

static TOADSTOOL: SpeciesProfile = SpeciesProfile {
    species: Species::Toadstool,
    params: &[
        (StemThickness, ParamSpec::uniform(0.10, 0.30)),
        (StemBaseThickness, ParamSpec::Constant(1.5)),
        (StemBaseOffset, ParamSpec::uniform(0.0, 0.1)),
        (CapHeight, ParamSpec::uniform(0.3, 1.0)),
        (CapWidth, ParamSpec::uniform(0.9, 2.5)),
        (CapTopWidth, ParamSpec::Constant(1.0)),
        (OverallScale, ParamSpec::uniform(0.045, 0.09)),
        (StemValueJitter, ParamSpec::uniform(-0.04, 0.0)),
        (DotRandomness, ParamSpec::uniform(0.5, 1.0)),
        (DotThreshold, ParamSpec::uniform(0.2, 0.45)),
        (CapGreen, ParamSpec::uniform(0.0, 0.05)),
    ],
    recipe: Recipe {
        stem: SolidRecipe {
            base: BaseColor::Rgb(Rgb::new(1.0, 0.847914, 0.631299)),
            jitter: &[Jitter::new(Channel::All, StemValueJitter)],
        },
        cap: CapRecipe::Dots(DotsRecipe {
            scale: 60.0,
            randomness: DotRandomness,
            threshold: DotThreshold,
            spot_green: CapGreen,
        }),
    },
};
