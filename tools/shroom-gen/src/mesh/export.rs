//! Wavefront OBJ/MTL export

use super::PolyMesh;
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Flat material written to the MTL library, indexed by slot
#[derive(Debug, Clone, Copy)]
pub struct ObjMaterial<'a> {
    pub name: &'a str,
    pub diffuse: [f32; 3],
}

/// Write a mesh as a single OBJ object without materials
pub fn write_obj(mesh: &PolyMesh, path: &Path, name: &str) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_obj_to(&mut w, mesh, name, None)?;
    w.flush()?;
    Ok(())
}

/// Write a mesh plus an MTL library next to it
///
/// The MTL file shares the OBJ's stem (`cap.obj` -> `cap.mtl`). Faces emit a
/// `usemtl` whenever their slot changes, picking `materials[slot.index()]`.
pub fn write_obj_with_materials(
    mesh: &PolyMesh,
    path: &Path,
    name: &str,
    materials: &[ObjMaterial<'_>],
) -> Result<()> {
    let mtl_path = path.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{name}.mtl"));

    let mut mtl = BufWriter::new(File::create(&mtl_path)?);
    write_mtl_to(&mut mtl, materials)?;
    mtl.flush()?;

    let mut w = BufWriter::new(File::create(path)?);
    write_obj_to(&mut w, mesh, name, Some((mtl_name.as_str(), materials)))?;
    w.flush()?;
    Ok(())
}

/// Write OBJ text to any writer
///
/// Indices are 1-based. Each face corner carries its vertex normal
/// (`f v//vn`), since positions and normals share one index space.
pub fn write_obj_to<W: Write>(
    w: &mut W,
    mesh: &PolyMesh,
    name: &str,
    library: Option<(&str, &[ObjMaterial<'_>])>,
) -> std::io::Result<()> {
    writeln!(w, "# shroom-gen control mesh")?;
    if let Some((mtl_name, _)) = library {
        writeln!(w, "mtllib {mtl_name}")?;
    }
    writeln!(w, "o {name}")?;

    for v in &mesh.verts {
        writeln!(w, "v {} {} {}", v.co.x, v.co.y, v.co.z)?;
    }
    for v in &mesh.verts {
        writeln!(w, "vn {} {} {}", v.normal.x, v.normal.y, v.normal.z)?;
    }

    let mut current = None;
    for face in &mesh.faces {
        if let Some((_, materials)) = library {
            if current != Some(face.slot) {
                if let Some(material) = materials.get(face.slot.index() as usize) {
                    writeln!(w, "usemtl {}", material.name)?;
                }
                current = Some(face.slot);
            }
        }
        write!(w, "f")?;
        for &v in &face.verts {
            write!(w, " {0}//{0}", v + 1)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn write_mtl_to<W: Write>(w: &mut W, materials: &[ObjMaterial<'_>]) -> std::io::Result<()> {
    writeln!(w, "# shroom-gen materials")?;
    for material in materials {
        let [r, g, b] = material.diffuse;
        writeln!(w)?;
        writeln!(w, "newmtl {}", material.name)?;
        writeln!(w, "Kd {r} {g} {b}")?;
        writeln!(w, "Ka 0 0 0")?;
        writeln!(w, "illum 1")?;
    }
    Ok(())
}
