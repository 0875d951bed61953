//! CPU preview of appearances
//!
//! Evaluates a [`PatternGraph`] per pixel on a vertical slice through object
//! space (x across, z up) and writes the result as an RGBA swatch. This is an
//! approximation for inspecting seeds, not a reference shader.

use super::appearance::Appearance;
use super::color::Rgb;
use super::graph::{MathOp, NodeId, NodeKind, PatternGraph, RampStop, Socket, WaveDirection};
use crate::error::{Error, Result};
use glam::{EulerRot, Mat3, Vec3};
use noise::{NoiseFn, Perlin};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Object space width covered by a swatch, roughly one cap across
pub const SWATCH_EXTENT: f32 = 0.15;
/// Largest swatch edge in pixels
pub const MAX_SWATCH_EDGE: u32 = 8192;

/// RGBA texture buffer
#[derive(Clone, Debug)]
pub struct TextureBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel, row-major order)
    pub pixels: Vec<u8>,
}

impl TextureBuffer {
    /// Create a buffer of transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 4],
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    /// Iterate over all pixels
    pub fn iter_pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
    }
}

/// Value flowing along a link
#[derive(Clone, Copy, Debug)]
enum Value {
    Vector(Vec3),
    Float(f32),
    Color(Rgb),
}

impl Value {
    fn as_vector(self) -> Vec3 {
        match self {
            Value::Vector(v) => v,
            Value::Float(f) => Vec3::splat(f),
            Value::Color(c) => Vec3::new(c.r, c.g, c.b),
        }
    }

    fn as_float(self) -> f32 {
        match self {
            Value::Vector(v) => (v.x + v.y + v.z) / 3.0,
            Value::Float(f) => f,
            // Luminance weights
            Value::Color(c) => 0.2126 * c.r + 0.7152 * c.g + 0.0722 * c.b,
        }
    }

    fn as_color(self) -> Rgb {
        match self {
            Value::Vector(v) => Rgb::new(v.x, v.y, v.z),
            Value::Float(f) => Rgb::grey(f),
            Value::Color(c) => c,
        }
    }
}

/// Per-graph evaluator with cached noise state
pub struct GraphEvaluator<'a> {
    graph: &'a PatternGraph,
    perlin: Perlin,
}

impl<'a> GraphEvaluator<'a> {
    pub fn new(graph: &'a PatternGraph) -> Result<Self> {
        graph.validate()?;
        Ok(Self {
            graph,
            perlin: Perlin::new(0),
        })
    }

    /// Evaluate the graph output as a color at object space point `p`
    pub fn color_at(&self, p: Vec3) -> Rgb {
        let mut outputs: Vec<Vec<(Socket, Value)>> = Vec::with_capacity(self.graph.nodes.len());

        for (index, kind) in self.graph.nodes.iter().enumerate() {
            let id = NodeId(index as u32);
            let input = |socket: Socket| -> Option<Value> {
                let link = self.graph.input_link(id, socket)?;
                outputs[link.from.index()]
                    .iter()
                    .find(|(s, _)| *s == link.from_socket)
                    .map(|(_, v)| *v)
            };
            let vector_in = || input(Socket::Vector).map_or(p, Value::as_vector);

            let produced = match kind {
                NodeKind::TexCoord { .. } => vec![(Socket::Object, Value::Vector(p))],
                NodeKind::Mapping {
                    location,
                    rotation,
                    scale,
                } => {
                    let rot = Mat3::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
                    let v = rot * (vector_in() * *scale) + *location;
                    vec![(Socket::Vector, Value::Vector(v))]
                }
                NodeKind::Voronoi {
                    scale, randomness, ..
                } => {
                    let (distance, cell) = voronoi_f1(vector_in() * *scale, *randomness);
                    vec![
                        (Socket::Distance, Value::Float(distance)),
                        (Socket::Color, Value::Color(cell_color(cell))),
                        (Socket::Position, Value::Vector(cell / *scale)),
                    ]
                }
                NodeKind::Wave {
                    direction,
                    scale,
                    distortion,
                    detail,
                    detail_scale,
                    phase,
                    ..
                } => {
                    let q = vector_in() * *scale;
                    let fac = self.wave_bands(q, *direction, *distortion, *detail, *detail_scale, *phase);
                    vec![
                        (Socket::Color, Value::Color(Rgb::grey(fac))),
                        (Socket::Fac, Value::Float(fac)),
                    ]
                }
                NodeKind::Math { op, value } => {
                    let a = input(Socket::Value).map_or(0.0, Value::as_float);
                    let result = match op {
                        MathOp::Add => a + value,
                        MathOp::LessThan => {
                            if a < *value {
                                1.0
                            } else {
                                0.0
                            }
                        }
                    };
                    vec![(Socket::Value, Value::Float(result))]
                }
                NodeKind::ColorRamp { stops, .. } => {
                    let fac = input(Socket::Fac).map_or(0.5, Value::as_float);
                    vec![
                        (Socket::Color, Value::Color(sample_ramp(stops, fac))),
                        (Socket::Alpha, Value::Float(1.0)),
                    ]
                }
            };
            outputs.push(produced);
        }

        let out = self.graph.output;
        outputs[out.node.index()]
            .iter()
            .find(|(s, _)| *s == out.socket)
            .map_or(Rgb::BLACK, |(_, v)| v.as_color())
    }

    /// Sine bands along one axis, distorted by fractal Perlin noise
    fn wave_bands(
        &self,
        q: Vec3,
        direction: WaveDirection,
        distortion: f32,
        detail: f32,
        detail_scale: f32,
        phase: f32,
    ) -> f32 {
        let axis = match direction {
            WaveDirection::X => q.x,
            WaveDirection::Y => q.y,
            WaveDirection::Z => q.z,
        };
        let mut n = axis * 20.0 + phase;
        if distortion != 0.0 {
            let octaves = detail.max(0.0) as u32 + 1;
            n += distortion * (self.fbm(q * detail_scale, octaves) * 2.0 - 1.0);
        }
        0.5 + 0.5 * (n - std::f32::consts::FRAC_PI_2).sin()
    }

    /// Fractal Brownian motion remapped to `[0, 1]`
    fn fbm(&self, p: Vec3, octaves: u32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            let s = p.as_dvec3() * frequency;
            total += self.perlin.get([s.x, s.y, s.z]) * amplitude;
            max_value += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        (((total / max_value) + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }
}

/// Linear color ramp lookup; clamps outside the first and last stop
pub fn sample_ramp(stops: &[RampStop], fac: f32) -> Rgb {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgb::BLACK;
    };
    if fac <= first.position {
        return first.color;
    }
    if fac >= last.position {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if fac >= a.position && fac <= b.position {
            let span = b.position - a.position;
            let t = if span > 0.0 { (fac - a.position) / span } else { 0.0 };
            return a.color.lerp(b.color, t);
        }
    }
    last.color
}

/// Integer lattice hash to three floats in `[0, 1)`
fn hash_cell(cell: [i32; 3]) -> Vec3 {
    let mut h = (cell[0] as u32).wrapping_mul(0x8da6_b343)
        ^ (cell[1] as u32).wrapping_mul(0xd816_3841)
        ^ (cell[2] as u32).wrapping_mul(0xcb1a_b31f);
    let mut next = || {
        h ^= h >> 16;
        h = h.wrapping_mul(0x7feb_352d);
        h ^= h >> 15;
        h = h.wrapping_mul(0x846c_a68b);
        h ^= h >> 16;
        (h >> 8) as f32 / (1u32 << 24) as f32
    };
    Vec3::new(next(), next(), next())
}

/// Distance to the nearest jittered feature point and that point
///
/// Hand-rolled because `noise::Worley` has no per-cell jitter amount.
fn voronoi_f1(p: Vec3, randomness: f32) -> (f32, Vec3) {
    let base = p.floor();
    let mut best = (f32::INFINITY, Vec3::ZERO);
    for dz in -1..=1 {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let cell = base + Vec3::new(dx as f32, dy as f32, dz as f32);
                let key = [cell.x as i32, cell.y as i32, cell.z as i32];
                let point = cell + hash_cell(key) * randomness.clamp(0.0, 1.0);
                let d = p.distance(point);
                if d < best.0 {
                    best = (d, point);
                }
            }
        }
    }
    best
}

fn cell_color(point: Vec3) -> Rgb {
    let h = hash_cell([
        point.x.floor() as i32,
        point.y.floor() as i32,
        point.z.floor() as i32,
    ]);
    Rgb::new(h.x, h.y, h.z)
}

/// Render an appearance onto a `width` x `height` swatch
///
/// Pixel `(x, y)` samples object point `(u, 0, v)` with `u` running left to
/// right and `v` bottom to top across [`SWATCH_EXTENT`].
///
/// Both edges must lie in `1..=MAX_SWATCH_EDGE`.
pub fn render_swatch(appearance: &Appearance, width: u32, height: u32) -> Result<TextureBuffer> {
    let edges = 1..=MAX_SWATCH_EDGE;
    if !edges.contains(&width) || !edges.contains(&height) {
        return Err(Error::SwatchSize { width, height });
    }
    let mut buffer = TextureBuffer::new(width, height);
    match appearance {
        Appearance::Solid { color } => {
            let rgba = color.to_rgba8();
            for chunk in buffer.pixels.chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
        Appearance::Pattern { graph, .. } => {
            let evaluator = GraphEvaluator::new(graph)?;
            let aspect = height as f32 / width.max(1) as f32;
            for y in 0..height {
                for x in 0..width {
                    let u = ((x as f32 + 0.5) / width as f32 - 0.5) * SWATCH_EXTENT;
                    let v = (0.5 - (y as f32 + 0.5) / height as f32) * SWATCH_EXTENT * aspect;
                    let color = evaluator.color_at(Vec3::new(u, 0.0, v));
                    buffer.set_pixel(x, y, color.to_rgba8());
                }
            }
        }
    }
    Ok(buffer)
}

/// Write a TextureBuffer to a PNG file
pub fn write_png(texture: &TextureBuffer, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, texture.width, texture.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    let mut writer = encoder
        .write_header()
        .map_err(|e| Error::Png(e.to_string()))?;
    writer
        .write_image_data(&texture.pixels)
        .map_err(|e| Error::Png(e.to_string()))?;

    Ok(())
}
