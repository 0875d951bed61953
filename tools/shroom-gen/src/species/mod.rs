//! Species selection, parameter tables and seeded sampling
//!
//! Each [`Species`] maps to one immutable [`SpeciesProfile`] holding its
//! parameter ranges (in draw order) and its appearance recipe. The
//! [`sampler`] turns a profile plus a seed into [`SampledParameters`].

mod profile;
mod sampler;

pub use profile::{ParamKey, ParamSpec, SpeciesProfile};
pub use sampler::{ParamStream, SampledParameters, sample, sample_profile};

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four supported mushroom species
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Boletus,
    CrestedInkling,
    DrabBonnet,
    Toadstool,
}

impl Species {
    /// All species in menu order
    pub const ALL: [Species; 4] = [
        Species::Boletus,
        Species::CrestedInkling,
        Species::DrabBonnet,
        Species::Toadstool,
    ];

    /// Human readable name, also used as the scene object name
    pub fn display_name(self) -> &'static str {
        match self {
            Species::Boletus => "Boletus",
            Species::CrestedInkling => "Crested Inkling",
            Species::DrabBonnet => "Drab Bonnet",
            Species::Toadstool => "Toadstool",
        }
    }

    /// Snake case identifier used for material names and file names
    pub fn slug(self) -> &'static str {
        match self {
            Species::Boletus => "boletus",
            Species::CrestedInkling => "crested_inkling",
            Species::DrabBonnet => "drab_bonnet",
            Species::Toadstool => "toadstool",
        }
    }

    /// Enum tag used by the host add-mesh menu (`SP1`..`SP4`)
    pub fn host_tag(self) -> &'static str {
        match self {
            Species::Boletus => "SP1",
            Species::CrestedInkling => "SP2",
            Species::DrabBonnet => "SP3",
            Species::Toadstool => "SP4",
        }
    }

    /// Parameter table and appearance recipe for this species
    pub fn profile(self) -> &'static SpeciesProfile {
        SpeciesProfile::of(self)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Species {
    type Err = Error;

    /// Accepts display names, snake/kebab case slugs and host tags, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "boletus" | "sp1" => Ok(Species::Boletus),
            "crested_inkling" | "inkling" | "sp2" => Ok(Species::CrestedInkling),
            "drab_bonnet" | "bonnet" | "sp3" => Ok(Species::DrabBonnet),
            "toadstool" | "sp4" => Ok(Species::Toadstool),
            _ => Err(Error::UnknownSpecies(s.to_string())),
        }
    }
}
