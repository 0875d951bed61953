//! Polygon mesh construction and sculpting
//!
//! - [`generate_cube`] builds the seed primitive
//! - [`modifiers`] holds the index-stable edit operations
//! - [`plan`] lists the fixed sequence of edits
//! - [`sculpt`] runs that sequence with sampled magnitudes
//! - [`export`] writes OBJ/MTL files

mod export;
pub mod modifiers;
pub mod plan;
mod primitives;
mod sculpt;
mod types;

pub use export::{ObjMaterial, write_obj, write_obj_to, write_obj_with_materials};
pub use modifiers::{
    Axes, Axis, DeleteFace, Extrude, Inset, MeshApply, MeshModifier, ScaleAxes, Transform,
    TranslateAlongNormal, TranslateAxis, VertexSet,
};
pub use plan::{Magnitude, PlanOp, PlanStep, TopologyPlan};
pub use primitives::generate_cube;
pub use sculpt::{sculpt, sculpt_with};
pub use types::{Face, MaterialSlot, PolyMesh, Vertex};
