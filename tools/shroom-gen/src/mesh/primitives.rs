//! Seed primitives for sculpting

use super::{MaterialSlot, PolyMesh};
use glam::Vec3;
use tracing::warn;

/// Face loops of the unit cube. Vertex `i` sits at x = bit 2, y = bit 1,
/// z = bit 0 of `i`; every loop winds counter-clockwise seen from outside.
const CUBE_FACES: [[u32; 4]; 6] = [
    [0, 1, 3, 2], // -X
    [2, 3, 7, 6], // +Y
    [6, 7, 5, 4], // +X
    [4, 5, 1, 0], // -Y
    [2, 6, 4, 0], // -Z (bottom)
    [7, 3, 1, 5], // +Z (top)
];

/// Generate an axis aligned cube centered on the origin
///
/// Produces 8 vertices and 6 quads in a fixed order with outward normals.
/// Every face starts in the stem slot; slots are reassigned after sculpting.
pub fn generate_cube(size: f32) -> PolyMesh {
    let size = if size <= 0.0 {
        warn!("generate_cube: size must be > 0.0, clamping to 0.001");
        0.001
    } else {
        size
    };
    let half = size * 0.5;

    let mut mesh = PolyMesh::new();
    for i in 0..8u32 {
        let sign = |bit: u32| if i & bit != 0 { half } else { -half };
        mesh.add_vertex(Vec3::new(sign(4), sign(2), sign(1)));
    }
    for face in CUBE_FACES {
        mesh.add_face(face.to_vec(), MaterialSlot::Stem);
    }
    mesh.recalc_normals();
    mesh
}
