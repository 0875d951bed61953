//! Deterministic procedural mushroom generator
//!
//! Given a species and a seed, this library sculpts a low-poly control mesh
//! out of a cube, builds a stem and a cap appearance, and assigns every face
//! to one of the two material slots. The same `(species, seed)` pair always
//! yields the same [`Mushroom`].
//!
//! # Example
//! ```no_run
//! use shroom_gen::{Species, generate};
//!
//! let mushroom = generate(Species::Toadstool, 42);
//! assert_eq!(mushroom.mesh.vertex_count(), 28);
//! assert_eq!(mushroom.mesh.face_count(), 26);
//!
//! // Control mesh plus flat-color materials for any OBJ viewer
//! mushroom.write_obj("toadstool.obj".as_ref())?;
//! # Ok::<(), shroom_gen::Error>(())
//! ```
//!
//! # Pattern preview
//! ```no_run
//! use shroom_gen::material::{render_swatch, write_png};
//! use shroom_gen::{Species, generate};
//!
//! let mushroom = generate(Species::CrestedInkling, 7);
//! let swatch = render_swatch(&mushroom.cap, 128, 128)?;
//! write_png(&swatch, "inkling_cap.png".as_ref())?;
//! # Ok::<(), shroom_gen::Error>(())
//! ```

pub mod error;
mod generate;
pub mod material;
pub mod mesh;
pub mod species;

pub use error::{Error, Result};
pub use generate::{
    COLLECTION, HostHints, Mushroom, SUBDIVISION_LEVELS, assign_faces, generate, generate_tagged,
    generate_with,
};
pub use material::Appearance;
pub use mesh::{MaterialSlot, PolyMesh};
pub use species::{ParamKey, SampledParameters, Species, sample};
