//! Running the `shroom` binary end to end

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn shroom() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shroom"))
}

fn count_prefixed(path: &Path, prefix: &str) -> usize {
    std::fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .filter(|l| l.starts_with(prefix))
        .count()
}

#[test]
fn test_generate_writes_obj_and_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let status = shroom()
        .args(["generate", "--species", "SP4", "--seed", "42", "--json", "-o"])
        .arg(dir.path())
        .status()
        .expect("Failed to run shroom");
    assert!(status.success());

    let obj = dir.path().join("toadstool_42.obj");
    assert_eq!(count_prefixed(&obj, "v "), 28);
    assert_eq!(count_prefixed(&obj, "f "), 26);
    assert!(dir.path().join("toadstool_42.json").exists());
}

#[test]
fn test_unknown_species_fails_without_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = shroom()
        .args(["generate", "--species", "amanita", "-o"])
        .arg(dir.path())
        .output()
        .expect("Failed to run shroom");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("amanita"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_batch_is_deterministic() {
    let dir = tempdir().expect("Failed to create temp dir");
    let manifest = dir.path().join("mushrooms.toml");
    std::fs::write(
        &manifest,
        r#"
[[mushroom]]
species = "boletus"
count = 3
base_seed = 10

[[mushroom]]
species = "drab_bonnet"
seeds = [7]
"#,
    )
    .expect("Failed to write manifest");

    for run in ["a", "b"] {
        let status = shroom()
            .arg("batch")
            .arg(&manifest)
            .arg("-o")
            .arg(dir.path().join(run))
            .status()
            .expect("Failed to run shroom");
        assert!(status.success());
    }

    for name in ["boletus_10", "boletus_11", "boletus_12", "drab_bonnet_7"] {
        let a = std::fs::read(dir.path().join("a").join(format!("{name}.obj"))).unwrap();
        let b = std::fs::read(dir.path().join("b").join(format!("{name}.obj"))).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn test_params_prints_json() {
    let output = shroom()
        .args(["params", "--species", "crested inkling", "--seed", "3", "--json"])
        .output()
        .expect("Failed to run shroom");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("params output should be JSON");
    assert!(value["overall_scale"].is_number());
}
