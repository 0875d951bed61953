//! Seeded parameter sampling

use super::{ParamKey, ParamSpec, Species, SpeciesProfile};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Random stream owned by a single generation call
///
/// Wraps a `Pcg64` so every call gets an explicit, reproducible stream
/// instead of touching any process-wide generator.
pub struct ParamStream {
    rng: Pcg64,
    draws: usize,
}

impl ParamStream {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Resolve one parameter spec. `Constant` does not advance the stream.
    pub fn draw(&mut self, spec: ParamSpec) -> f32 {
        match spec {
            ParamSpec::Uniform { min, max } => {
                self.draws += 1;
                self.rng.random_range(min..=max)
            }
            ParamSpec::Constant(value) => value,
        }
    }

    /// Number of uniform draws consumed so far
    pub fn draws(&self) -> usize {
        self.draws
    }
}

/// Parameter values for one generation call, in draw order
#[derive(Clone, Debug, PartialEq)]
pub struct SampledParameters {
    values: Vec<(ParamKey, f32)>,
}

impl SampledParameters {
    /// Value of `key`
    ///
    /// # Panics
    /// If the species profile does not define `key`. Callers only ask for
    /// keys their own recipe references, so a miss is an internal bug.
    pub fn get(&self, key: ParamKey) -> f32 {
        match self.try_get(key) {
            Some(value) => value,
            None => panic!("parameter {} was not sampled for this species", key.name()),
        }
    }

    pub fn try_get(&self, key: ParamKey) -> Option<f32> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, f32)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of these parameters with one value replaced
    ///
    /// Used to vary a single magnitude while holding the rest fixed.
    pub fn with(&self, key: ParamKey, value: f32) -> Self {
        let mut values = self.values.clone();
        match values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => values.push((key, value)),
        }
        Self { values }
    }
}

impl Serialize for SampledParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key.name(), value)?;
        }
        map.end()
    }
}

/// Sample every parameter of `species` from a stream seeded with `seed`
pub fn sample(species: Species, seed: u64) -> SampledParameters {
    let mut stream = ParamStream::new(seed);
    sample_profile(species.profile(), &mut stream)
}

/// Sample a profile's table in order from an existing stream
pub fn sample_profile(profile: &SpeciesProfile, stream: &mut ParamStream) -> SampledParameters {
    let values = profile
        .params
        .iter()
        .map(|&(key, spec)| {
            let value = stream.draw(spec);
            debug_assert!(
                spec.contains(value),
                "{} = {value} outside {:?}",
                key.name(),
                spec.bounds()
            );
            (key, value)
        })
        .collect();

    tracing::trace!(
        species = profile.species.slug(),
        draws = stream.draws(),
        "sampled parameters"
    );

    SampledParameters { values }
}
