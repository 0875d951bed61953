//! Polygon mesh types
//!
//! Unlike a triangle soup, a `PolyMesh` keeps n-gon faces with positionally
//! stable indices so that the sculpting plan can address vertices and faces
//! by number.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Material slot a face renders with
///
/// The stem material is appended to the object first, so it owns slot 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialSlot {
    #[default]
    Stem,
    Cap,
}

impl MaterialSlot {
    /// Slot index on the host object
    pub fn index(self) -> u32 {
        match self {
            MaterialSlot::Stem => 0,
            MaterialSlot::Cap => 1,
        }
    }
}

/// Mesh vertex with a derived normal
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub co: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(co: Vec3) -> Self {
        Self {
            co,
            normal: Vec3::ZERO,
        }
    }
}

/// Polygon face as an ordered vertex loop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub verts: Vec<u32>,
    pub slot: MaterialSlot,
}

/// Editable polygon mesh
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyMesh {
    pub verts: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl PolyMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Append a vertex, returning its index
    pub fn add_vertex(&mut self, co: Vec3) -> u32 {
        let index = self.verts.len() as u32;
        self.verts.push(Vertex::new(co));
        index
    }

    /// Append a face, returning its index
    ///
    /// # Panics
    /// If any vertex index is out of range or the loop has fewer than 3 vertices.
    pub fn add_face(&mut self, verts: Vec<u32>, slot: MaterialSlot) -> usize {
        assert!(verts.len() >= 3, "face needs at least 3 vertices, got {}", verts.len());
        for &v in &verts {
            assert!(
                (v as usize) < self.verts.len(),
                "face references vertex {v} but mesh has {}",
                self.verts.len()
            );
        }
        self.faces.push(Face { verts, slot });
        self.faces.len() - 1
    }

    /// Face at `index`
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn face(&self, index: usize) -> &Face {
        assert!(
            index < self.faces.len(),
            "face {index} out of range (mesh has {} faces)",
            self.faces.len()
        );
        &self.faces[index]
    }

    /// Vertex position at `index`
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn co(&self, index: u32) -> Vec3 {
        assert!(
            (index as usize) < self.verts.len(),
            "vertex {index} out of range (mesh has {} vertices)",
            self.verts.len()
        );
        self.verts[index as usize].co
    }

    /// Unnormalized Newell normal; its length is twice the face area
    fn newell(&self, index: usize) -> Vec3 {
        let face = self.face(index);
        let n = face.verts.len();
        (0..n).fold(Vec3::ZERO, |acc, i| {
            let a = self.co(face.verts[i]);
            let b = self.co(face.verts[(i + 1) % n]);
            acc + a.cross(b)
        })
    }

    /// Unit face normal, or zero for a degenerate face
    pub fn face_normal(&self, index: usize) -> Vec3 {
        self.newell(index).normalize_or_zero()
    }

    pub fn face_area(&self, index: usize) -> f32 {
        self.newell(index).length() * 0.5
    }

    /// Average of the face's vertex positions
    pub fn face_center(&self, index: usize) -> Vec3 {
        let face = self.face(index);
        let sum: Vec3 = face.verts.iter().map(|&v| self.co(v)).sum();
        sum / face.verts.len() as f32
    }

    /// Recompute every vertex normal from the current faces
    ///
    /// A vertex normal is the normalized sum of the unit normals of its
    /// faces. Zero-area faces contribute nothing and loose vertices end
    /// up with a zero normal.
    pub fn recalc_normals(&mut self) {
        let mut sums = vec![Vec3::ZERO; self.verts.len()];
        for index in 0..self.faces.len() {
            let normal = self.face_normal(index);
            for &v in &self.faces[index].verts {
                sums[v as usize] += normal;
            }
        }
        for (vertex, sum) in self.verts.iter_mut().zip(sums) {
            vertex.normal = sum.normalize_or_zero();
        }
    }

    /// Axis aligned bounds as `(min, max)`
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.verts.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), v| (min.min(v.co), max.max(v.co)),
        )
    }

    /// Total area of all faces assigned to `slot`
    pub fn slot_area(&self, slot: MaterialSlot) -> f32 {
        (0..self.faces.len())
            .filter(|&i| self.faces[i].slot == slot)
            .map(|i| self.face_area(i))
            .sum()
    }
}
