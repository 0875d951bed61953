//! Writing generated mushrooms to disk

use anyhow::{Context, Result};
use shroom_gen::{Mushroom, Species};
use std::path::{Path, PathBuf};

/// File stem shared by every file written for one mushroom
pub fn file_stem(species: Species, seed: u64) -> String {
    format!("{}_{seed}", species.slug())
}

/// Files written for one mushroom
#[derive(Debug)]
pub struct Written {
    pub obj: PathBuf,
    pub json: Option<PathBuf>,
}

/// Write `mushroom` into `dir` as OBJ + MTL, plus the JSON record when asked
pub fn write_mushroom(mushroom: &Mushroom, dir: &Path, json: bool) -> Result<Written> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let stem = file_stem(mushroom.species, mushroom.seed);
    let obj = dir.join(format!("{stem}.obj"));
    mushroom
        .write_obj(&obj)
        .with_context(|| format!("Failed to write mesh: {}", obj.display()))?;

    let json = if json {
        let path = dir.join(format!("{stem}.json"));
        let record =
            serde_json::to_string_pretty(mushroom).context("Failed to serialize mushroom")?;
        std::fs::write(&path, record)
            .with_context(|| format!("Failed to write record: {}", path.display()))?;
        Some(path)
    } else {
        None
    };

    Ok(Written { obj, json })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shroom_gen::generate;
    use tempfile::tempdir;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Species::CrestedInkling, 7), "crested_inkling_7");
    }

    #[test]
    fn test_write_mushroom_with_json() {
        let dir = tempdir().expect("Failed to create temp dir");
        let out = dir.path().join("nested");
        let mushroom = generate(Species::Toadstool, 42);

        let written = write_mushroom(&mushroom, &out, true).expect("Failed to write");
        assert_eq!(written.obj, out.join("toadstool_42.obj"));
        assert!(written.obj.exists());
        assert!(out.join("toadstool_42.mtl").exists());

        let json_path = written.json.expect("json requested");
        let record: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(record["seed"], 42);
        assert_eq!(record["species"], "toadstool");
    }

    #[test]
    fn test_write_mushroom_without_json() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mushroom = generate(Species::Boletus, 1);
        let written = write_mushroom(&mushroom, dir.path(), false).expect("Failed to write");
        assert!(written.json.is_none());
        assert!(!dir.path().join("boletus_1.json").exists());
    }
}
