//! Batch command - generate every mushroom in a manifest
//!
//! Generation calls share nothing, so jobs run in parallel; output is
//! reported afterwards in manifest order.

use crate::manifest::{BatchManifest, Job};
use crate::output::{Written, write_mushroom};
use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use shroom_gen::generate;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments for the batch command
#[derive(Args)]
pub struct BatchArgs {
    /// Path to the batch manifest
    #[arg(default_value = "mushrooms.toml")]
    pub manifest: PathBuf,

    /// Output directory (overrides manifest)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write JSON records even if the manifest does not ask for them
    #[arg(long)]
    pub json: bool,
}

/// Execute the batch command
pub fn execute(args: BatchArgs) -> Result<()> {
    let manifest = BatchManifest::load(&args.manifest)?;
    manifest.validate()?;

    let output_dir = match &args.output {
        Some(dir) => dir.clone(),
        None => resolve_output_dir(&args.manifest, &manifest.output.dir),
    };
    let json = args.json || manifest.output.json;

    let jobs = manifest.jobs()?;
    println!("=== Batch ===");
    println!("  Manifest: {}", args.manifest.display());
    println!("  Output: {}", output_dir.display());
    println!("  Mushrooms: {}", jobs.len());

    let written = run_jobs(&jobs, &output_dir, json)?;

    for (job, files) in jobs.iter().zip(&written) {
        println!("  {} seed {}: {}", job.species, job.seed, files.obj.display());
    }
    info!(count = written.len(), "batch complete");
    Ok(())
}

/// Relative manifest output paths are taken from the manifest's directory
fn resolve_output_dir(manifest_path: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    manifest_path
        .parent()
        .map(|parent| parent.join(dir))
        .unwrap_or_else(|| dir.to_path_buf())
}

/// Generate and write every job, returning files in job order
pub fn run_jobs(jobs: &[Job], output_dir: &Path, json: bool) -> Result<Vec<Written>> {
    jobs.par_iter()
        .map(|job| {
            let mushroom = generate(job.species, job.seed);
            debug!(species = job.species.slug(), seed = job.seed, "writing mushroom");
            write_mushroom(&mushroom, output_dir, json)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shroom_gen::Species;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_output_dir() {
        assert_eq!(
            resolve_output_dir(Path::new("assets/mushrooms.toml"), Path::new("out")),
            PathBuf::from("assets/out")
        );
        assert_eq!(
            resolve_output_dir(Path::new("mushrooms.toml"), Path::new("out")),
            PathBuf::from("out")
        );
    }

    #[test]
    fn test_run_jobs_keeps_order() {
        let dir = tempdir().expect("Failed to create temp dir");
        let jobs: Vec<Job> = (0..6)
            .map(|seed| Job {
                species: Species::ALL[seed as usize % Species::ALL.len()],
                seed,
            })
            .collect();

        let written = run_jobs(&jobs, dir.path(), false).expect("Failed to run batch");
        assert_eq!(written.len(), jobs.len());
        for (job, files) in jobs.iter().zip(&written) {
            let expected = format!("{}_{}.obj", job.species.slug(), job.seed);
            assert_eq!(files.obj, dir.path().join(expected));
            assert!(files.obj.exists());
        }
    }

    #[test]
    fn test_execute_from_manifest() {
        let dir = tempdir().expect("Failed to create temp dir");
        let manifest_path = dir.path().join("mushrooms.toml");
        std::fs::write(
            &manifest_path,
            r#"
[output]
dir = "meshes"
json = true

[[mushroom]]
species = "crested_inkling"
seeds = [4, 5]
"#,
        )
        .expect("Failed to write manifest");

        execute(BatchArgs {
            manifest: manifest_path,
            output: None,
            json: false,
        })
        .expect("Batch failed");

        let out = dir.path().join("meshes");
        for seed in [4, 5] {
            assert!(out.join(format!("crested_inkling_{seed}.obj")).exists());
            assert!(out.join(format!("crested_inkling_{seed}.mtl")).exists());
            assert!(out.join(format!("crested_inkling_{seed}.json")).exists());
        }
    }
}
