//! Mushroom generation entry points and face assignment

use crate::error::Result;
use crate::material::{Appearance, build_appearance};
use crate::mesh::plan::slot_ranges;
use crate::mesh::{self, MaterialSlot, ObjMaterial, PolyMesh, generate_cube, sculpt};
use crate::species::{SampledParameters, Species, sample};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Scene collection every mushroom is linked into
pub const COLLECTION: &str = "Mushroom";
/// Display-only smoothing levels requested from the host
pub const SUBDIVISION_LEVELS: u32 = 4;

/// Host-side placement hints that travel with a generated mushroom
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HostHints {
    pub object_name: String,
    pub collection: String,
    pub stem_material: String,
    pub cap_material: String,
    pub subdivision_levels: u32,
    pub render_levels: u32,
}

impl HostHints {
    pub fn for_species(species: Species) -> Self {
        Self {
            object_name: species.display_name().to_string(),
            collection: COLLECTION.to_string(),
            stem_material: format!("{}_stem", species.slug()),
            cap_material: format!("{}_cap", species.slug()),
            subdivision_levels: SUBDIVISION_LEVELS,
            render_levels: SUBDIVISION_LEVELS,
        }
    }
}

/// One generated mushroom: control mesh, appearances and slot assignment
#[derive(Clone, Debug, Serialize)]
pub struct Mushroom {
    pub species: Species,
    pub seed: u64,
    pub params: SampledParameters,
    pub mesh: PolyMesh,
    pub stem: Appearance,
    pub cap: Appearance,
    /// Material slot per face, parallel to `mesh.faces`
    pub face_slots: Vec<MaterialSlot>,
    pub host: HostHints,
}

impl Mushroom {
    /// Appearance rendered by faces in `slot`
    pub fn appearance(&self, slot: MaterialSlot) -> &Appearance {
        match slot {
            MaterialSlot::Stem => &self.stem,
            MaterialSlot::Cap => &self.cap,
        }
    }

    /// Material names indexed by slot
    pub fn material_names(&self) -> [&str; 2] {
        [self.host.stem_material.as_str(), self.host.cap_material.as_str()]
    }

    /// Write the control mesh with a flat-color MTL library
    pub fn write_obj(&self, path: &Path) -> Result<()> {
        let [stem_name, cap_name] = self.material_names();
        let materials = [
            ObjMaterial {
                name: stem_name,
                diffuse: self.stem.viewport_color().to_array(),
            },
            ObjMaterial {
                name: cap_name,
                diffuse: self.cap.viewport_color().to_array(),
            },
        ];
        mesh::write_obj_with_materials(&self.mesh, path, &self.host.object_name, &materials)
    }
}

/// Assign cap and stem slots to the sculpted faces
///
/// # Panics
/// If the mesh does not have the sculpted face count.
pub fn assign_faces(mesh: &mut PolyMesh) -> Vec<MaterialSlot> {
    let ranges = slot_ranges();
    let covered: usize = ranges.iter().map(|(_, r)| r.clone().count()).sum();
    assert_eq!(mesh.face_count(), covered, "face assignment expects a sculpted mesh");

    for (slot, range) in ranges {
        for face in range {
            mesh.faces[face].slot = slot;
        }
    }
    mesh.faces.iter().map(|f| f.slot).collect()
}

/// Generate a mushroom of `species` from `seed`
///
/// Deterministic: the same inputs always produce an identical result.
pub fn generate(species: Species, seed: u64) -> Mushroom {
    let params = sample(species, seed);
    generate_with(species, seed, params)
}

/// Generate from already sampled parameters
///
/// # Panics
/// If `params` lacks a parameter of the species profile or holds a value
/// outside its range.
pub fn generate_with(species: Species, seed: u64, params: SampledParameters) -> Mushroom {
    check_params(species, &params);
    let mut mesh = sculpt(generate_cube(1.0), &params);
    let (stem, cap) = build_appearance(species, &params);
    let face_slots = assign_faces(&mut mesh);

    debug!(
        species = species.slug(),
        seed,
        verts = mesh.vertex_count(),
        faces = mesh.face_count(),
        "mushroom generated"
    );

    Mushroom {
        species,
        seed,
        params,
        mesh,
        stem,
        cap,
        face_slots,
        host: HostHints::for_species(species),
    }
}

fn check_params(species: Species, params: &SampledParameters) {
    for &(key, spec) in species.profile().params {
        let Some(value) = params.try_get(key) else {
            panic!("{species} parameters are missing {}", key.name());
        };
        assert!(
            spec.contains(value),
            "{species} parameter {} = {value} is outside {:?}",
            key.name(),
            spec.bounds()
        );
    }
}

/// Generate from a species tag such as `"toadstool"` or `"SP4"`
///
/// Unknown tags fail before any mesh work.
pub fn generate_tagged(tag: &str, seed: u64) -> Result<Mushroom> {
    let species: Species = tag.parse()?;
    Ok(generate(species, seed))
}
