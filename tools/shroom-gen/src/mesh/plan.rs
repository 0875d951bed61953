//! The fixed topology plan that turns a cube into a mushroom
//!
//! The order of operations and every index they touch are constant; only
//! the magnitudes come from sampled parameters. Each step records the vertex
//! and face counts it must leave behind, which both [`TopologyPlan::check`]
//! and the sculpting engine verify.

use super::modifiers::{
    Axes, Axis, DeleteFace, Extrude, Inset, MeshModifier, ScaleAxes, Transform, TranslateAlongNormal,
    TranslateAxis, VertexSet,
};
use super::{MaterialSlot, PolyMesh};
use crate::error::{Error, Result};
use crate::species::{ParamKey, SampledParameters};
use serde::Serialize;
use std::ops::RangeInclusive;

/// Named indices the plan and face assignment address
pub mod idx {
    use super::VertexSet;
    use std::ops::RangeInclusive;

    /// Cube bottom, inset into the cap rim
    pub const BOTTOM_FACE: usize = 4;
    /// Gill cavity ceiling once the bottom face is gone
    pub const GILL_FACE: usize = 9;
    /// Lower end of the first stem segment once its root face is gone
    pub const STEM_FACE: usize = 17;

    pub const GILL_VERTS: VertexSet = VertexSet::Range(12, 16);
    pub const STEM_VERTS: VertexSet = VertexSet::Range(20, 24);
    pub const BASE_VERTS: VertexSet = VertexSet::Range(24, 28);
    /// Cube bottom corners plus the inset rim
    pub const CAP_RIM: &[u32] = &[0, 2, 4, 6, 8, 9, 10, 11];
    /// Cube top corners
    pub const CAP_TOP: &[u32] = &[1, 3, 5, 7];

    pub const CAP_FACES: RangeInclusive<usize> = 0..=16;
    pub const STEM_FACES: RangeInclusive<usize> = 17..=25;

    pub const FINAL_VERTS: usize = 28;
    pub const FINAL_FACES: usize = 26;
}

/// Source of an operation's magnitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Magnitude {
    Fixed(f32),
    Param(ParamKey),
    Negated(ParamKey),
}

impl Magnitude {
    pub fn resolve(self, params: &SampledParameters) -> f32 {
        match self {
            Magnitude::Fixed(value) => value,
            Magnitude::Param(key) => params.get(key),
            Magnitude::Negated(key) => -params.get(key),
        }
    }

    fn key(self) -> Option<ParamKey> {
        match self {
            Magnitude::Fixed(_) => None,
            Magnitude::Param(key) | Magnitude::Negated(key) => Some(key),
        }
    }
}

/// One operation of the plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PlanOp {
    Inset { face: usize, thickness: Magnitude },
    Extrude { face: usize },
    DeleteFace { face: usize },
    TranslateAlongNormal { verts: VertexSet, distance: Magnitude },
    ScaleAxes { verts: VertexSet, axes: Axes, factor: Magnitude },
    TranslateAxis { verts: VertexSet, axis: Axis, distance: Magnitude },
    ScaleUniform { factor: Magnitude },
}

impl PlanOp {
    /// Resolve magnitudes and apply the matching modifier
    pub fn apply(&self, mesh: &mut PolyMesh, params: &SampledParameters) {
        match *self {
            PlanOp::Inset { face, thickness } => Inset {
                face,
                thickness: thickness.resolve(params),
            }
            .apply(mesh),
            PlanOp::Extrude { face } => Extrude { face }.apply(mesh),
            PlanOp::DeleteFace { face } => DeleteFace { face }.apply(mesh),
            PlanOp::TranslateAlongNormal { verts, distance } => TranslateAlongNormal {
                verts,
                distance: distance.resolve(params),
            }
            .apply(mesh),
            PlanOp::ScaleAxes { verts, axes, factor } => ScaleAxes {
                verts,
                axes,
                factor: factor.resolve(params),
            }
            .apply(mesh),
            PlanOp::TranslateAxis { verts, axis, distance } => TranslateAxis {
                verts,
                axis,
                distance: distance.resolve(params),
            }
            .apply(mesh),
            PlanOp::ScaleUniform { factor } => {
                Transform::scale_uniform(factor.resolve(params)).apply(mesh)
            }
        }
    }

    fn magnitude(&self) -> Option<Magnitude> {
        match *self {
            PlanOp::Inset { thickness, .. } => Some(thickness),
            PlanOp::TranslateAlongNormal { distance, .. }
            | PlanOp::TranslateAxis { distance, .. } => Some(distance),
            PlanOp::ScaleAxes { factor, .. } | PlanOp::ScaleUniform { factor } => Some(factor),
            PlanOp::Extrude { .. } | PlanOp::DeleteFace { .. } => None,
        }
    }
}

/// A plan step and the counts it leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanStep {
    pub label: &'static str,
    pub op: PlanOp,
    pub verts_after: usize,
    pub faces_after: usize,
}

/// Ordered list of sculpting steps applied to the seed cube
#[derive(Debug, Serialize)]
pub struct TopologyPlan {
    pub seed_verts: usize,
    pub seed_faces: usize,
    pub steps: &'static [PlanStep],
}

const fn step(label: &'static str, op: PlanOp, verts_after: usize, faces_after: usize) -> PlanStep {
    PlanStep {
        label,
        op,
        verts_after,
        faces_after,
    }
}

use Magnitude::{Fixed, Negated, Param};

static STEPS: [PlanStep; 17] = [
    // Cap rim and gill cavity
    step("inset cap rim", PlanOp::Inset { face: idx::BOTTOM_FACE, thickness: Fixed(0.25) }, 12, 10),
    step("extrude gill cavity", PlanOp::Extrude { face: idx::BOTTOM_FACE }, 16, 15),
    step(
        "sink gill cavity",
        PlanOp::TranslateAlongNormal { verts: idx::GILL_VERTS, distance: Fixed(-0.8) },
        16,
        15,
    ),
    step("drop cube bottom", PlanOp::DeleteFace { face: idx::BOTTOM_FACE }, 16, 14),
    // Stem
    step(
        "inset stem",
        PlanOp::Inset { face: idx::GILL_FACE, thickness: Param(ParamKey::StemThickness) },
        20,
        18,
    ),
    step("extrude stem", PlanOp::Extrude { face: idx::GILL_FACE }, 24, 23),
    step(
        "lower stem",
        PlanOp::TranslateAlongNormal { verts: idx::STEM_VERTS, distance: Fixed(1.0) },
        24,
        23,
    ),
    step("drop stem root", PlanOp::DeleteFace { face: idx::GILL_FACE }, 24, 22),
    step("extrude stem base", PlanOp::Extrude { face: idx::STEM_FACE }, 28, 27),
    step(
        "lower stem base",
        PlanOp::TranslateAlongNormal { verts: idx::BASE_VERTS, distance: Fixed(1.0) },
        28,
        27,
    ),
    step("drop stem base root", PlanOp::DeleteFace { face: idx::STEM_FACE }, 28, 26),
    // Shaping
    step(
        "widen stem base",
        PlanOp::ScaleAxes {
            verts: idx::BASE_VERTS,
            axes: Axes::XY,
            factor: Param(ParamKey::StemBaseThickness),
        },
        28,
        26,
    ),
    step(
        "offset stem base",
        PlanOp::TranslateAxis {
            verts: idx::BASE_VERTS,
            axis: Axis::X,
            distance: Negated(ParamKey::StemBaseOffset),
        },
        28,
        26,
    ),
    step(
        "cap height",
        PlanOp::ScaleAxes {
            verts: VertexSet::List(idx::CAP_RIM),
            axes: Axes::Z,
            factor: Param(ParamKey::CapHeight),
        },
        28,
        26,
    ),
    step(
        "cap width",
        PlanOp::ScaleAxes {
            verts: VertexSet::List(idx::CAP_RIM),
            axes: Axes::XY,
            factor: Param(ParamKey::CapWidth),
        },
        28,
        26,
    ),
    step(
        "cap top width",
        PlanOp::ScaleAxes {
            verts: VertexSet::List(idx::CAP_TOP),
            axes: Axes::XY,
            factor: Param(ParamKey::CapTopWidth),
        },
        28,
        26,
    ),
    step("overall scale", PlanOp::ScaleUniform { factor: Param(ParamKey::OverallScale) }, 28, 26),
];

static MUSHROOM_PLAN: TopologyPlan = TopologyPlan {
    seed_verts: 8,
    seed_faces: 6,
    steps: &STEPS,
};

impl TopologyPlan {
    /// The plan every species is sculpted with
    pub fn mushroom() -> &'static TopologyPlan {
        &MUSHROOM_PLAN
    }

    /// Dry run over face arities
    ///
    /// Verifies that every step addresses existing faces and vertices, that
    /// magnitudes only reference shape parameters, and that the recorded
    /// counts match what the operations produce. No geometry is built.
    pub fn check(&self) -> Result<()> {
        let mut verts = self.seed_verts;
        let mut faces = vec![4usize; self.seed_faces];

        for step in self.steps {
            let fail = |message: String| Error::Plan {
                step: step.label,
                message,
            };

            let key = step.op.magnitude().and_then(Magnitude::key);
            if let Some(key) = key.filter(|k| !k.is_shape()) {
                return Err(fail(format!("magnitude reads non-shape parameter {}", key.name())));
            }

            match step.op {
                PlanOp::Inset { face, .. } => {
                    let n = *faces
                        .get(face)
                        .ok_or_else(|| fail(format!("face {face} of {}", faces.len())))?;
                    verts += n;
                    faces.extend(std::iter::repeat_n(4, n));
                }
                PlanOp::Extrude { face } => {
                    let n = *faces
                        .get(face)
                        .ok_or_else(|| fail(format!("face {face} of {}", faces.len())))?;
                    verts += n;
                    faces.push(n);
                    faces.extend(std::iter::repeat_n(4, n));
                }
                PlanOp::DeleteFace { face } => {
                    if face >= faces.len() {
                        return Err(fail(format!("face {face} of {}", faces.len())));
                    }
                    faces.remove(face);
                }
                PlanOp::TranslateAlongNormal { verts: set, .. }
                | PlanOp::ScaleAxes { verts: set, .. }
                | PlanOp::TranslateAxis { verts: set, .. } => {
                    if set.required_len() > verts {
                        return Err(fail(format!(
                            "vertex set needs {} vertices, mesh has {verts}",
                            set.required_len()
                        )));
                    }
                }
                PlanOp::ScaleUniform { .. } => {}
            }

            if verts != step.verts_after || faces.len() != step.faces_after {
                return Err(fail(format!(
                    "expected {}v/{}f, got {verts}v/{}f",
                    step.verts_after,
                    step.faces_after,
                    faces.len()
                )));
            }
        }
        Ok(())
    }

    /// Counts after the last step
    pub fn final_counts(&self) -> (usize, usize) {
        self.steps
            .last()
            .map_or((self.seed_verts, self.seed_faces), |s| (s.verts_after, s.faces_after))
    }
}

/// Face ranges each material slot covers after sculpting
pub fn slot_ranges() -> [(MaterialSlot, RangeInclusive<usize>); 2] {
    [
        (MaterialSlot::Cap, idx::CAP_FACES),
        (MaterialSlot::Stem, idx::STEM_FACES),
    ]
}
