//! End-to-end properties of mushroom generation

use shroom_gen::mesh::TopologyPlan;
use shroom_gen::{MaterialSlot, ParamKey, Species, generate, generate_with, sample};
use tempfile::tempdir;

#[test]
fn test_generation_is_deterministic() {
    for species in Species::ALL {
        for seed in [0, 1, 42, u64::MAX] {
            let a = generate(species, seed);
            let b = generate(species, seed);
            assert_eq!(a.params, b.params);
            assert_eq!(a.mesh, b.mesh);
            assert_eq!(a.stem, b.stem);
            assert_eq!(a.cap, b.cap);
            assert_eq!(a.face_slots, b.face_slots);
        }
    }
}

#[test]
fn test_topology_is_invariant() {
    let reference = generate(Species::Boletus, 0);
    for species in Species::ALL {
        for seed in 0..20 {
            let m = generate(species, seed);
            assert_eq!(m.mesh.vertex_count(), 28);
            assert_eq!(m.mesh.face_count(), 26);
            assert_eq!(m.face_slots, reference.face_slots);
            let loops: Vec<&Vec<u32>> = m.mesh.faces.iter().map(|f| &f.verts).collect();
            let reference_loops: Vec<&Vec<u32>> =
                reference.mesh.faces.iter().map(|f| &f.verts).collect();
            assert_eq!(loops, reference_loops, "{species} seed {seed}");
        }
    }
}

#[test]
fn test_parameters_stay_in_range() {
    for species in Species::ALL {
        let profile = species.profile();
        for seed in 0..200 {
            let params = sample(species, seed);
            assert_eq!(params.len(), profile.params.len());
            for (key, value) in params.iter() {
                assert!(
                    profile.contains(key, value),
                    "{species} seed {seed}: {} = {value}",
                    key.name()
                );
            }
        }
    }
}

#[test]
fn test_overall_scale_scales_distances() {
    let species = Species::Toadstool;
    let params = sample(species, 17);
    let (base, k) = (0.05, 1.75);

    let small = generate_with(species, 17, params.with(ParamKey::OverallScale, base));
    let large = generate_with(species, 17, params.with(ParamKey::OverallScale, base * k));

    for (a, b) in small.mesh.verts.iter().zip(&large.mesh.verts) {
        let expected = a.co.length() * k;
        assert!(
            (b.co.length() - expected).abs() <= expected.max(1e-6) * 1e-5,
            "{} vs {expected}",
            b.co.length()
        );
    }
}

#[test]
fn test_negative_cap_height_inverts_rim() {
    let (seed, params) = (0..200)
        .map(|seed| (seed, sample(Species::DrabBonnet, seed)))
        .find(|(_, p)| p.get(ParamKey::CapHeight) < 0.0)
        .expect("some seed below 200 should draw a negative cap height");

    let mushroom = generate(Species::DrabBonnet, seed);
    assert_eq!(mushroom.params, params);

    for v in [0u32, 2, 4, 6, 8, 9, 10, 11] {
        assert!(mushroom.mesh.co(v).z > 0.0, "rim vertex {v} should flip above the origin");
    }
    for v in &mushroom.mesh.verts {
        assert!(v.co.is_finite());
        assert!(v.normal.is_finite());
    }
    for face in 0..mushroom.mesh.face_count() {
        assert!(mushroom.mesh.face_area(face) > 0.0, "face {face} collapsed");
    }
}

#[test]
fn test_toadstool_seeds_42_and_43() {
    let a = generate(Species::Toadstool, 42);
    let again = generate(Species::Toadstool, 42);
    let b = generate(Species::Toadstool, 43);

    assert_eq!(a.mesh, again.mesh);
    assert_ne!(
        a.params.get(ParamKey::StemThickness),
        b.params.get(ParamKey::StemThickness)
    );
    assert_ne!(a.params.get(ParamKey::CapWidth), b.params.get(ParamKey::CapWidth));
    assert_eq!(a.mesh.vertex_count(), b.mesh.vertex_count());
    assert_eq!(a.mesh.face_count(), b.mesh.face_count());
    assert_eq!(a.face_slots, b.face_slots);
}

#[test]
fn test_plan_dry_run_matches_generated_counts() {
    let plan = TopologyPlan::mushroom();
    plan.check().expect("plan should validate");
    let (verts, faces) = plan.final_counts();
    let m = generate(Species::CrestedInkling, 9);
    assert_eq!((m.mesh.vertex_count(), m.mesh.face_count()), (verts, faces));
}

#[test]
fn test_slot_areas_are_positive() {
    for species in Species::ALL {
        let m = generate(species, 5);
        assert!(m.mesh.slot_area(MaterialSlot::Cap) > 0.0);
        assert!(m.mesh.slot_area(MaterialSlot::Stem) > 0.0);
    }
}

#[test]
fn test_obj_export_round_trips_counts() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("toadstool.obj");
    let mushroom = generate(Species::Toadstool, 42);
    mushroom.write_obj(&path).expect("Failed to write OBJ");

    let obj = std::fs::read_to_string(&path).expect("Failed to read OBJ");
    assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 28);
    assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 26);
    assert!(obj.contains("mtllib toadstool.mtl"));
    assert!(obj.contains("o Toadstool"));
    assert!(obj.contains("usemtl toadstool_cap"));
    assert!(obj.contains("usemtl toadstool_stem"));

    let mtl = std::fs::read_to_string(dir.path().join("toadstool.mtl")).expect("Failed to read MTL");
    assert!(mtl.contains("newmtl toadstool_stem"));
    assert!(mtl.contains("newmtl toadstool_cap"));
}

#[test]
fn test_json_record() {
    let mushroom = generate(Species::Boletus, 3);
    let json: serde_json::Value = serde_json::to_value(&mushroom).expect("serialize");
    assert_eq!(json["species"], "boletus");
    assert_eq!(json["seed"], 3);
    assert_eq!(json["host"]["collection"], "Mushroom");
    assert_eq!(json["mesh"]["verts"].as_array().map(Vec::len), Some(28));
    assert_eq!(json["face_slots"][0], "cap");
    assert_eq!(json["face_slots"][25], "stem");
    assert!(json["params"]["stem_thickness"].is_number());
}

#[test]
fn test_unknown_tag_fails_fast() {
    let err = shroom_gen::generate_tagged("amanita", 1).unwrap_err();
    assert!(err.to_string().contains("amanita"));
}
