//! Stem and cap appearance construction
//!
//! Solid appearances are a base color nudged by sampled jitter. Pattern
//! appearances are [`PatternGraph`]s: texture coordinates through a mapping
//! into a noise node, a math node and a color ramp.

mod appearance;
mod color;
pub mod graph;
pub mod preview;
pub mod recipes;

pub use appearance::{Appearance, build_appearance};
pub use color::{Hsv, Rgb};
pub use graph::{GraphBuilder, NodeId, NodeKind, PatternGraph, Socket};
pub use preview::{MAX_SWATCH_EDGE, TextureBuffer, render_swatch, write_png};
