//! Procedural pattern graphs
//!
//! A [`PatternGraph`] is a small DAG of typed shader nodes joined by explicit
//! socket links. Nodes are stored in topological order: a link always runs
//! from an earlier node to a later one, which the [`GraphBuilder`] enforces.
//! The generator only builds graphs; hosts (or [`super::preview`]) evaluate
//! them.

use super::color::Rgb;
use crate::error::{Error, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Index of a node inside its graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Named input or output socket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Socket {
    Object,
    Vector,
    Distance,
    Position,
    Color,
    Fac,
    Value,
    Alpha,
}

/// Coordinate space emitted by a texture coordinate node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordSpace {
    Object,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoronoiFeature {
    F1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    Euclidean,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveType {
    Bands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveDirection {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveProfile {
    Sine,
}

/// Scalar operation; the linked input is the first operand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathOp {
    Add,
    LessThan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RampInterpolation {
    Linear,
}

/// Color ramp stop
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RampStop {
    pub position: f32,
    pub color: Rgb,
}

impl RampStop {
    pub const fn new(position: f32, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Node type and its settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    TexCoord {
        space: CoordSpace,
    },
    Mapping {
        location: Vec3,
        rotation: Vec3,
        scale: Vec3,
    },
    Voronoi {
        dimensions: u8,
        feature: VoronoiFeature,
        metric: DistanceMetric,
        scale: f32,
        randomness: f32,
    },
    Wave {
        wave_type: WaveType,
        direction: WaveDirection,
        profile: WaveProfile,
        scale: f32,
        distortion: f32,
        detail: f32,
        detail_scale: f32,
        phase: f32,
    },
    Math {
        op: MathOp,
        /// Second operand
        value: f32,
    },
    ColorRamp {
        interpolation: RampInterpolation,
        stops: Vec<RampStop>,
    },
}

impl NodeKind {
    /// Identity mapping with the given scale
    pub fn mapping_scale(scale: Vec3) -> Self {
        NodeKind::Mapping {
            location: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale,
        }
    }

    pub fn inputs(&self) -> &'static [Socket] {
        match self {
            NodeKind::TexCoord { .. } => &[],
            NodeKind::Mapping { .. } | NodeKind::Voronoi { .. } | NodeKind::Wave { .. } => {
                &[Socket::Vector]
            }
            NodeKind::Math { .. } => &[Socket::Value],
            NodeKind::ColorRamp { .. } => &[Socket::Fac],
        }
    }

    pub fn outputs(&self) -> &'static [Socket] {
        match self {
            NodeKind::TexCoord { .. } => &[Socket::Object],
            NodeKind::Mapping { .. } => &[Socket::Vector],
            NodeKind::Voronoi { .. } => &[Socket::Distance, Socket::Color, Socket::Position],
            NodeKind::Wave { .. } => &[Socket::Color, Socket::Fac],
            NodeKind::Math { .. } => &[Socket::Value],
            NodeKind::ColorRamp { .. } => &[Socket::Color, Socket::Alpha],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::TexCoord { .. } => "tex_coord",
            NodeKind::Mapping { .. } => "mapping",
            NodeKind::Voronoi { .. } => "voronoi",
            NodeKind::Wave { .. } => "wave",
            NodeKind::Math { .. } => "math",
            NodeKind::ColorRamp { .. } => "color_ramp",
        }
    }
}

/// Directed connection from an output socket to an input socket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub from: NodeId,
    pub from_socket: Socket,
    pub to: NodeId,
    pub to_socket: Socket,
}

/// Designated graph output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub node: NodeId,
    pub socket: Socket,
}

/// Procedural pattern graph
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternGraph {
    pub nodes: Vec<NodeKind>,
    pub links: Vec<Link>,
    pub output: Output,
}

impl PatternGraph {
    pub fn node(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.index())
    }

    /// Link feeding `socket` of `node`, if any
    pub fn input_link(&self, node: NodeId, socket: Socket) -> Option<&Link> {
        self.links
            .iter()
            .find(|l| l.to == node && l.to_socket == socket)
    }

    /// First node of the given kind name
    pub fn find(&self, name: &str) -> Option<(NodeId, &NodeKind)> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, kind)| kind.name() == name)
            .map(|(i, kind)| (NodeId(i as u32), kind))
    }

    /// Check wiring rules on a graph that did not come from the builder
    /// (e.g. deserialized)
    pub fn validate(&self) -> Result<()> {
        let mut seen: Vec<(NodeId, Socket)> = Vec::with_capacity(self.links.len());
        for link in &self.links {
            check_link(&self.nodes, link)?;
            if seen.contains(&(link.to, link.to_socket)) {
                return Err(Error::Graph(format!(
                    "input {:?} of node {} linked twice",
                    link.to_socket, link.to.0
                )));
            }
            seen.push((link.to, link.to_socket));
        }
        check_output(&self.nodes, self.output)
    }
}

fn check_link(nodes: &[NodeKind], link: &Link) -> Result<()> {
    let from = nodes
        .get(link.from.index())
        .ok_or_else(|| Error::Graph(format!("link source node {} missing", link.from.0)))?;
    let to = nodes
        .get(link.to.index())
        .ok_or_else(|| Error::Graph(format!("link target node {} missing", link.to.0)))?;

    if link.from >= link.to {
        return Err(Error::Graph(format!(
            "link {} -> {} does not run forward",
            link.from.0, link.to.0
        )));
    }
    if !from.outputs().contains(&link.from_socket) {
        return Err(Error::Graph(format!(
            "{} has no output {:?}",
            from.name(),
            link.from_socket
        )));
    }
    if !to.inputs().contains(&link.to_socket) {
        return Err(Error::Graph(format!(
            "{} has no input {:?}",
            to.name(),
            link.to_socket
        )));
    }
    Ok(())
}

fn check_output(nodes: &[NodeKind], output: Output) -> Result<()> {
    let node = nodes
        .get(output.node.index())
        .ok_or_else(|| Error::Graph(format!("output node {} missing", output.node.0)))?;
    if !node.outputs().contains(&output.socket) {
        return Err(Error::Graph(format!(
            "{} has no output {:?}",
            node.name(),
            output.socket
        )));
    }
    Ok(())
}

/// Incremental graph construction with wiring checks
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<NodeKind>,
    links: Vec<Link>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(kind);
        NodeId(self.nodes.len() as u32 - 1)
    }

    /// Connect `from.from_socket` to `to.to_socket`
    pub fn link(&mut self, from: NodeId, from_socket: Socket, to: NodeId, to_socket: Socket) -> Result<()> {
        let link = Link {
            from,
            from_socket,
            to,
            to_socket,
        };
        check_link(&self.nodes, &link)?;
        if self.links.iter().any(|l| l.to == to && l.to_socket == to_socket) {
            return Err(Error::Graph(format!(
                "input {to_socket:?} of node {} already linked",
                to.0
            )));
        }
        self.links.push(link);
        Ok(())
    }

    /// Append `kind` and feed it from `from.from_socket` into its first input
    pub fn chain(&mut self, from: NodeId, from_socket: Socket, kind: NodeKind) -> Result<NodeId> {
        let input = kind.inputs().first().copied().ok_or_else(|| {
            Error::Graph(format!("{} has no inputs to chain into", kind.name()))
        })?;
        let id = self.add(kind);
        self.link(from, from_socket, id, input)?;
        Ok(id)
    }

    pub fn finish(self, node: NodeId, socket: Socket) -> Result<PatternGraph> {
        let output = Output { node, socket };
        check_output(&self.nodes, output)?;
        Ok(PatternGraph {
            nodes: self.nodes,
            links: self.links,
            output,
        })
    }
}
