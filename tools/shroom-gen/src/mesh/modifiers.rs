//! Mesh modifiers for the sculpting engine
//!
//! Topological edits (inset, extrude, face deletion) append their new
//! elements at deterministic positions so later steps can keep addressing
//! geometry by index. Vertex edits work on a [`VertexSet`].
//!
//! # Fluent API
//!
//! ```no_run
//! use shroom_gen::mesh::*;
//!
//! let mut mesh = generate_cube(1.0);
//! mesh.apply(Inset { face: 4, thickness: 0.25 })
//!     .apply(Extrude { face: 4 })
//!     .apply(DeleteFace { face: 4 });
//! ```

use super::PolyMesh;
use glam::{Mat4, Vec3};
use serde::Serialize;

/// Trait for mesh modifiers
pub trait MeshModifier {
    /// Apply this modifier to a mesh, modifying it in place
    fn apply(&self, mesh: &mut PolyMesh);
}

/// Extension trait for fluent modifier application
pub trait MeshApply {
    /// Apply a modifier and return `&mut Self` for chaining
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self;
}

impl MeshApply for PolyMesh {
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self {
        modifier.apply(self);
        self
    }
}

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Set of coordinate axes a scale acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Axes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Axes {
    pub const XY: Axes = Axes { x: true, y: true, z: false };
    pub const Z: Axes = Axes { x: false, y: false, z: true };

    /// Per-component multiplier: `factor` on selected axes, 1 elsewhere
    fn factors(self, factor: f32) -> Vec3 {
        let pick = |on: bool| if on { factor } else { 1.0 };
        Vec3::new(pick(self.x), pick(self.y), pick(self.z))
    }
}

/// Vertices addressed by index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VertexSet {
    /// Half open range `start..end`
    Range(u32, u32),
    List(&'static [u32]),
}

impl VertexSet {
    /// Resolve to concrete indices for a mesh with `vertex_count` vertices
    ///
    /// # Panics
    /// If any index is out of range.
    pub fn indices(&self, vertex_count: usize) -> Vec<u32> {
        let indices: Vec<u32> = match *self {
            VertexSet::Range(start, end) => (start..end).collect(),
            VertexSet::List(list) => list.to_vec(),
        };
        if let Some(&bad) = indices.iter().find(|&&v| v as usize >= vertex_count) {
            panic!("vertex {bad} out of range (mesh has {vertex_count} vertices)");
        }
        indices
    }

    /// Largest index in the set plus one
    pub fn required_len(&self) -> usize {
        match *self {
            VertexSet::Range(_, end) => end as usize,
            VertexSet::List(list) => list.iter().map(|&v| v as usize + 1).max().unwrap_or(0),
        }
    }
}

/// Inset a face in its own plane by an even `thickness`
///
/// Appends one inner vertex per corner (in loop order), rewires the face to
/// the inner loop, then appends ring faces `[v_i, v_{i+1}, w_{i+1}, w_i]`.
/// Every edge moves inward by exactly `thickness`, so corners travel along
/// their bisector by `thickness / cos(half angle)`.
#[derive(Debug, Clone, Copy)]
pub struct Inset {
    pub face: usize,
    pub thickness: f32,
}

impl MeshModifier for Inset {
    fn apply(&self, mesh: &mut PolyMesh) {
        let normal = mesh.face_normal(self.face);
        let outer = mesh.face(self.face).verts.clone();
        let slot = mesh.face(self.face).slot;
        let n = outer.len();
        let co: Vec<Vec3> = outer.iter().map(|&v| mesh.co(v)).collect();

        let inner: Vec<u32> = (0..n)
            .map(|i| {
                let prev = co[(i + n - 1) % n];
                let next = co[(i + 1) % n];
                let in_prev = normal.cross((co[i] - prev).normalize_or_zero());
                let in_next = normal.cross((next - co[i]).normalize_or_zero());
                let bisector = (in_prev + in_next).normalize_or_zero();
                let cos_half = bisector.dot(in_next);
                let offset = if cos_half > 1e-6 {
                    bisector * (self.thickness / cos_half)
                } else {
                    in_next * self.thickness
                };
                mesh.add_vertex(co[i] + offset)
            })
            .collect();

        mesh.faces[self.face].verts = inner.clone();
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.add_face(vec![outer[i], outer[j], inner[j], inner[i]], slot);
        }
        mesh.recalc_normals();
    }
}

/// Extrude a face without moving it
///
/// Appends copies of the face's vertices, a new face on the copies and one
/// side quad `[a_i, a_{i+1}, b_{i+1}, b_i]` per edge. The source face stays
/// in place; remove it with [`DeleteFace`].
#[derive(Debug, Clone, Copy)]
pub struct Extrude {
    pub face: usize,
}

impl MeshModifier for Extrude {
    fn apply(&self, mesh: &mut PolyMesh) {
        let source = mesh.face(self.face).verts.clone();
        let slot = mesh.face(self.face).slot;
        let n = source.len();

        let copies: Vec<u32> = source
            .iter()
            .map(|&v| {
                let co = mesh.co(v);
                mesh.add_vertex(co)
            })
            .collect();

        mesh.add_face(copies.clone(), slot);
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.add_face(vec![source[i], source[j], copies[j], copies[i]], slot);
        }
        mesh.recalc_normals();
    }
}

/// Remove a face record, keeping its vertices
///
/// Later faces shift down by one.
#[derive(Debug, Clone, Copy)]
pub struct DeleteFace {
    pub face: usize,
}

impl MeshModifier for DeleteFace {
    fn apply(&self, mesh: &mut PolyMesh) {
        assert!(
            self.face < mesh.face_count(),
            "cannot delete face {} (mesh has {} faces)",
            self.face,
            mesh.face_count()
        );
        mesh.faces.remove(self.face);
        mesh.recalc_normals();
    }
}

/// Move vertices along their current derived normals
#[derive(Debug, Clone, Copy)]
pub struct TranslateAlongNormal {
    pub verts: VertexSet,
    pub distance: f32,
}

impl MeshModifier for TranslateAlongNormal {
    fn apply(&self, mesh: &mut PolyMesh) {
        for v in self.verts.indices(mesh.vertex_count()) {
            let vertex = &mut mesh.verts[v as usize];
            vertex.co += vertex.normal * self.distance;
        }
    }
}

/// Scale selected coordinates of a vertex set about the origin
#[derive(Debug, Clone, Copy)]
pub struct ScaleAxes {
    pub verts: VertexSet,
    pub axes: Axes,
    pub factor: f32,
}

impl MeshModifier for ScaleAxes {
    fn apply(&self, mesh: &mut PolyMesh) {
        let factors = self.axes.factors(self.factor);
        for v in self.verts.indices(mesh.vertex_count()) {
            mesh.verts[v as usize].co *= factors;
        }
    }
}

/// Offset one coordinate of a vertex set
#[derive(Debug, Clone, Copy)]
pub struct TranslateAxis {
    pub verts: VertexSet,
    pub axis: Axis,
    pub distance: f32,
}

impl MeshModifier for TranslateAxis {
    fn apply(&self, mesh: &mut PolyMesh) {
        let axis = self.axis.index();
        for v in self.verts.indices(mesh.vertex_count()) {
            mesh.verts[v as usize].co[axis] += self.distance;
        }
    }
}

/// Transform every vertex and normal with a 4x4 matrix
///
/// Normals go through the inverse-transpose so non-uniform scales keep them
/// perpendicular to their faces.
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self {
            matrix: Mat4::from_scale(Vec3::new(x, y, z)),
        }
    }

    pub fn scale_uniform(s: f32) -> Self {
        Self::scale(s, s, s)
    }
}

impl MeshModifier for Transform {
    fn apply(&self, mesh: &mut PolyMesh) {
        let normal_matrix = self.matrix.inverse().transpose();
        for vertex in &mut mesh.verts {
            vertex.co = self.matrix.transform_point3(vertex.co);
            vertex.normal = normal_matrix
                .transform_vector3(vertex.normal)
                .normalize_or_zero();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::generate_cube;

    #[test]
    fn test_inset_square_moves_edges_evenly() {
        let mut mesh = generate_cube(1.0);
        mesh.apply(Inset { face: 4, thickness: 0.25 });

        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 10);
        assert_eq!(mesh.face(4).verts, vec![8, 9, 10, 11]);
        // Inner loop is a 0.5 square in the bottom plane
        assert!((mesh.face_area(4) - 0.25).abs() < 1e-5);
        for v in 8..12 {
            let co = mesh.co(v);
            assert!((co.x.abs() - 0.25).abs() < 1e-5);
            assert!((co.y.abs() - 0.25).abs() < 1e-5);
            assert!((co.z + 0.5).abs() < 1e-6);
        }
        // Ring faces share the source face orientation
        for f in 6..10 {
            assert!((mesh.face_normal(f) - Vec3::NEG_Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_inset_past_center_flips_loop_in_plane() {
        let mut mesh = generate_cube(1.0);
        mesh.apply(Inset { face: 4, thickness: 0.25 })
            .apply(Inset { face: 4, thickness: 0.3 });

        // 0.5 square inset by 0.3 crosses over into a 0.1 square
        assert!((mesh.face_area(4) - 0.01).abs() < 1e-5);
        assert!((mesh.face_normal(4) - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_extrude_leaves_stale_face() {
        let mut mesh = generate_cube(1.0);
        mesh.apply(Extrude { face: 5 });

        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 11);
        assert_eq!(mesh.face(5).verts, vec![7, 3, 1, 5]);
        assert_eq!(mesh.face(6).verts, vec![8, 9, 10, 11]);
        assert_eq!(mesh.face(7).verts, vec![7, 3, 9, 8]);
        // Unmoved side quads have no area yet
        assert!(mesh.face_area(7) < 1e-6);
    }

    #[test]
    fn test_extrude_then_translate_along_normal() {
        let mut mesh = generate_cube(1.0);
        mesh.apply(Extrude { face: 5 })
            .apply(TranslateAlongNormal { verts: VertexSet::Range(8, 12), distance: 1.0 })
            .apply(DeleteFace { face: 5 });

        for v in 8..12 {
            assert!((mesh.co(v).z - 1.5).abs() < 1e-5);
        }
        assert_eq!(mesh.face_count(), 10);
        // New cap face shifted into the deleted slot
        assert_eq!(mesh.face(5).verts, vec![8, 9, 10, 11]);
        for f in 6..10 {
            assert!((mesh.face_area(f) - 1.0).abs() < 1e-5);
            assert!(mesh.face_center(f).z > 0.5);
        }
    }

    #[test]
    fn test_delete_face_keeps_vertices() {
        let mut mesh = generate_cube(1.0);
        mesh.apply(DeleteFace { face: 0 });
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 5);
        assert_eq!(mesh.face(0).verts, vec![2, 3, 7, 6]);
    }

    #[test]
    fn test_scale_axes_and_translate_axis() {
        let mut mesh = generate_cube(1.0);
        mesh.apply(ScaleAxes { verts: VertexSet::List(&[1, 3]), axes: Axes::XY, factor: 2.0 })
            .apply(TranslateAxis { verts: VertexSet::Range(0, 2), axis: Axis::X, distance: -0.5 });

        assert_eq!(mesh.co(3), Vec3::new(-1.0, 1.0, 0.5));
        assert_eq!(mesh.co(1), Vec3::new(-1.5, -1.0, 0.5));
        assert_eq!(mesh.co(0), Vec3::new(-1.0, -0.5, -0.5));
    }

    #[test]
    fn test_transform_scale_uniform() {
        let mut mesh = generate_cube(1.0);
        Transform::scale_uniform(3.0).apply(&mut mesh);
        assert_eq!(mesh.co(7), Vec3::splat(1.5));
        assert!((mesh.verts[7].normal - Vec3::ONE.normalize()).length() < 1e-5);
    }

    #[test]
    fn test_transform_non_uniform_scale_keeps_normals_perpendicular() {
        let mut mesh = generate_cube(1.0);
        mesh.apply(Transform::scale(2.0, 1.0, 0.5));
        assert_eq!(mesh.co(7), Vec3::new(1.0, 0.5, 0.25));
        // Inverse-transpose: (1,1,1) scaled by (1/2, 1, 2)
        let expected = Vec3::new(0.5, 1.0, 2.0).normalize();
        assert!((mesh.verts[7].normal - expected).length() < 1e-5);
    }

    #[test]
    #[should_panic(expected = "vertex 8 out of range")]
    fn test_vertex_set_checks_range() {
        let mut mesh = generate_cube(1.0);
        mesh.apply(TranslateAxis { verts: VertexSet::Range(6, 9), axis: Axis::Z, distance: 1.0 });
    }

    #[test]
    fn test_vertex_set_required_len() {
        assert_eq!(VertexSet::Range(24, 28).required_len(), 28);
        assert_eq!(VertexSet::List(&[0, 11, 4]).required_len(), 12);
    }
}
