//! Batch manifest parsing
//!
//! A manifest lists species and the seeds to generate for each, either as an
//! explicit `seeds` list or as `count` consecutive seeds from `base_seed`.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use shroom_gen::Species;
use std::path::{Path, PathBuf};

/// mushrooms.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct BatchManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default, rename = "mushroom")]
    pub mushrooms: Vec<MushroomEntry>,
}

/// Where and what to write
#[derive(Debug, Deserialize)]
pub struct OutputSection {
    /// Output directory, relative to the manifest
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Write the JSON record next to each OBJ.
    /// Default: false
    #[serde(default)]
    pub json: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            json: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

/// One `[[mushroom]]` table
#[derive(Debug, Deserialize)]
pub struct MushroomEntry {
    /// Species name or host tag
    pub species: String,

    /// Explicit seeds
    #[serde(default)]
    pub seeds: Option<Vec<u64>>,

    /// Number of consecutive seeds to generate
    #[serde(default)]
    pub count: Option<u64>,

    /// First seed when `count` is used.
    /// Default: 0
    #[serde(default)]
    pub base_seed: u64,
}

/// A single unit of batch work
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Job {
    pub species: Species,
    pub seed: u64,
}

impl MushroomEntry {
    /// Seeds requested by this entry
    pub fn seeds(&self) -> Result<Vec<u64>> {
        match (&self.seeds, self.count) {
            (Some(seeds), None) => Ok(seeds.clone()),
            (None, Some(count)) => {
                let end = self.base_seed.checked_add(count).with_context(|| {
                    format!(
                        "Seed range overflows: base_seed {} + count {count}",
                        self.base_seed
                    )
                })?;
                Ok((self.base_seed..end).collect())
            }
            (Some(_), Some(_)) => bail!(
                "Mushroom entry '{}' sets both 'seeds' and 'count'",
                self.species
            ),
            (None, None) => bail!(
                "Mushroom entry '{}' needs either 'seeds' or 'count'",
                self.species
            ),
        }
    }
}

impl BatchManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse batch manifest")
    }

    /// Validate manifest contents
    ///
    /// Species tags and seed selections are checked before any generation
    /// starts.
    pub fn validate(&self) -> Result<()> {
        if self.mushrooms.is_empty() {
            bail!("Manifest lists no [[mushroom]] entries");
        }
        for entry in &self.mushrooms {
            entry
                .species
                .parse::<Species>()
                .with_context(|| format!("Invalid species in manifest: '{}'", entry.species))?;
            if entry.seeds()?.is_empty() {
                bail!("Mushroom entry '{}' selects no seeds", entry.species);
            }
        }
        Ok(())
    }

    /// Flatten the manifest into jobs, in manifest order
    pub fn jobs(&self) -> Result<Vec<Job>> {
        let mut jobs = Vec::new();
        for entry in &self.mushrooms {
            let species: Species = entry.species.parse()?;
            jobs.extend(entry.seeds()?.into_iter().map(|seed| Job { species, seed }));
        }
        Ok(jobs)
    }
}
