//! Mesh sculpting engine

use super::plan::TopologyPlan;
use super::PolyMesh;
use crate::species::SampledParameters;
use tracing::{debug, trace};

/// Sculpt the seed cube into a mushroom control mesh
///
/// Walks [`TopologyPlan::mushroom`] in order. Vertex normals are refreshed
/// after each topological edit and once more at the end.
///
/// # Panics
/// If `mesh` is not the plan's seed primitive or a step leaves the wrong
/// vertex or face count. Both are programming errors, never input errors.
pub fn sculpt(mesh: PolyMesh, params: &SampledParameters) -> PolyMesh {
    sculpt_with(TopologyPlan::mushroom(), mesh, params)
}

/// Sculpt with an explicit plan
pub fn sculpt_with(plan: &TopologyPlan, mut mesh: PolyMesh, params: &SampledParameters) -> PolyMesh {
    assert_eq!(
        (mesh.vertex_count(), mesh.face_count()),
        (plan.seed_verts, plan.seed_faces),
        "sculpt expects the seed primitive"
    );

    for step in plan.steps {
        step.op.apply(&mut mesh, params);
        assert_eq!(
            mesh.vertex_count(),
            step.verts_after,
            "vertex count after '{}'",
            step.label
        );
        assert_eq!(
            mesh.face_count(),
            step.faces_after,
            "face count after '{}'",
            step.label
        );
        trace!(
            step = step.label,
            verts = mesh.vertex_count(),
            faces = mesh.face_count(),
            "plan step applied"
        );
    }

    mesh.recalc_normals();
    debug!(
        verts = mesh.vertex_count(),
        faces = mesh.face_count(),
        "sculpt finished"
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::generate_cube;
    use crate::mesh::plan::idx;
    use crate::species::{ParamKey, Species, sample};

    #[test]
    fn test_sculpt_counts() {
        let params = sample(Species::Toadstool, 42);
        let mesh = sculpt(generate_cube(1.0), &params);
        assert_eq!(mesh.vertex_count(), idx::FINAL_VERTS);
        assert_eq!(mesh.face_count(), idx::FINAL_FACES);
    }

    #[test]
    fn test_gill_cavity_and_stem_heights() {
        // Unit scale so coordinates stay in cube space
        let params = sample(Species::Boletus, 5).with(ParamKey::OverallScale, 1.0);
        let mesh = sculpt(generate_cube(1.0), &params);

        for v in 12..20 {
            assert!((mesh.co(v).z - 0.3).abs() < 1e-5, "vertex {v}");
        }
        for v in 20..24 {
            assert!((mesh.co(v).z + 0.7).abs() < 1e-5, "vertex {v}");
        }
        for v in 24..28 {
            assert!((mesh.co(v).z + 1.7).abs() < 1e-5, "vertex {v}");
        }
    }

    #[test]
    fn test_stem_base_offset_moves_negative_x() {
        let params = sample(Species::DrabBonnet, 11)
            .with(ParamKey::OverallScale, 1.0)
            .with(ParamKey::StemBaseOffset, 0.4);
        let mesh = sculpt(generate_cube(1.0), &params);

        let base: glam::Vec3 = (24..28).map(|v| mesh.co(v)).sum::<glam::Vec3>() / 4.0;
        let stem: glam::Vec3 = (20..24).map(|v| mesh.co(v)).sum::<glam::Vec3>() / 4.0;
        assert!((base.x - (stem.x - 0.4)).abs() < 1e-5);
    }

    #[test]
    fn test_no_degenerate_faces() {
        for species in Species::ALL {
            for seed in 0..32 {
                let mesh = sculpt(generate_cube(1.0), &sample(species, seed));
                for face in 0..mesh.face_count() {
                    assert!(mesh.face_area(face) > 0.0, "{species} seed {seed} face {face}");
                }
                assert!(mesh.verts.iter().all(|v| v.co.is_finite() && v.normal.is_finite()));
            }
        }
    }

    #[test]
    #[should_panic(expected = "seed primitive")]
    fn test_rejects_non_cube_seed() {
        let mut mesh = generate_cube(1.0);
        mesh.faces.pop();
        sculpt(mesh, &sample(Species::Boletus, 0));
    }
}
