//! Per-species appearance recipes
//!
//! A recipe names base colors, fixed node settings and which sampled
//! parameters perturb them. Recipes live in the species profiles and are
//! turned into [`super::Appearance`] values by [`super::build_appearance`].

use super::color::{Hsv, Rgb};
use super::graph::{
    CoordSpace, DistanceMetric, GraphBuilder, MathOp, NodeKind, PatternGraph, RampInterpolation,
    RampStop, Socket, VoronoiFeature, WaveDirection, WaveProfile, WaveType,
};
use crate::error::Result;
use crate::species::{ParamKey, SampledParameters};
use glam::Vec3;

/// Color channel a jitter is added to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Hue in degrees
    Hue,
    Saturation,
    Value,
    Red,
    Green,
    Blue,
    /// Red, green and blue together
    All,
}

impl Channel {
    fn is_hsv(self) -> bool {
        matches!(self, Channel::Hue | Channel::Saturation | Channel::Value)
    }
}

/// Additive perturbation of one channel by a sampled amount
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Jitter {
    pub channel: Channel,
    pub key: ParamKey,
}

impl Jitter {
    pub const fn new(channel: Channel, key: ParamKey) -> Self {
        Self { channel, key }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BaseColor {
    Hsv(Hsv),
    Rgb(Rgb),
}

/// Flat color with seeded perturbation
#[derive(Clone, Copy, Debug)]
pub struct SolidRecipe {
    pub base: BaseColor,
    pub jitter: &'static [Jitter],
}

impl SolidRecipe {
    /// Resolve to an in-gamut color
    ///
    /// HSV jitters apply first (converting an RGB base if needed), RGB
    /// jitters after, then every channel is clamped.
    pub fn color(&self, params: &SampledParameters) -> Rgb {
        let amount = |j: &Jitter| params.get(j.key);
        let has_hsv = self.jitter.iter().any(|j| j.channel.is_hsv());

        let mut rgb = match self.base {
            BaseColor::Rgb(rgb) if !has_hsv => rgb,
            base => {
                let mut hsv = match base {
                    BaseColor::Hsv(hsv) => hsv,
                    BaseColor::Rgb(rgb) => rgb.to_hsv(),
                };
                for j in self.jitter.iter().filter(|j| j.channel.is_hsv()) {
                    match j.channel {
                        Channel::Hue => hsv.h += amount(j),
                        Channel::Saturation => hsv.s = (hsv.s + amount(j)).clamp(0.0, 1.0),
                        Channel::Value => hsv.v = (hsv.v + amount(j)).clamp(0.0, 1.0),
                        _ => {}
                    }
                }
                hsv.to_rgb()
            }
        };

        for j in self.jitter.iter().filter(|j| !j.channel.is_hsv()) {
            let d = amount(j);
            match j.channel {
                Channel::Red => rgb.r += d,
                Channel::Green => rgb.g += d,
                Channel::Blue => rgb.b += d,
                Channel::All => {
                    rgb.r += d;
                    rgb.g += d;
                    rgb.b += d;
                }
                _ => {}
            }
        }
        rgb.clamped()
    }
}

/// Cellular dots: Voronoi distance thresholded into a two-stop ramp
#[derive(Clone, Copy, Debug)]
pub struct DotsRecipe {
    pub scale: f32,
    pub randomness: ParamKey,
    pub threshold: ParamKey,
    /// Green channel of the base (non-dot) color
    pub spot_green: ParamKey,
}

impl DotsRecipe {
    /// Red cap color under the dots
    pub fn base_color(&self, params: &SampledParameters) -> Rgb {
        Rgb::new(1.0, params.get(self.spot_green), 0.0)
    }

    pub fn graph(&self, params: &SampledParameters) -> Result<PatternGraph> {
        let mut b = GraphBuilder::new();
        let coord = b.add(NodeKind::TexCoord {
            space: CoordSpace::Object,
        });
        let mapping = b.chain(coord, Socket::Object, NodeKind::mapping_scale(Vec3::ONE))?;
        let voronoi = b.chain(
            mapping,
            Socket::Vector,
            NodeKind::Voronoi {
                dimensions: 3,
                feature: VoronoiFeature::F1,
                metric: DistanceMetric::Euclidean,
                scale: self.scale,
                randomness: params.get(self.randomness),
            },
        )?;
        let threshold = b.chain(
            voronoi,
            Socket::Distance,
            NodeKind::Math {
                op: MathOp::LessThan,
                value: params.get(self.threshold),
            },
        )?;
        let ramp = b.chain(
            threshold,
            Socket::Value,
            NodeKind::ColorRamp {
                interpolation: RampInterpolation::Linear,
                stops: vec![
                    RampStop::new(0.0, self.base_color(params)),
                    RampStop::new(1.0, Rgb::WHITE),
                ],
            },
        )?;
        b.finish(ramp, Socket::Color)
    }
}

/// Ink-streaked wave bands over a three-stop ramp
#[derive(Clone, Copy, Debug)]
pub struct BandsRecipe {
    pub stretch: ParamKey,
    pub scale: ParamKey,
    pub distortion: ParamKey,
    pub bias: ParamKey,
    pub shade_value: ParamKey,
}

impl BandsRecipe {
    pub const PALE: Rgb = Rgb::new(0.97, 0.96, 0.93);
    pub const INK: Rgb = Rgb::new(0.08, 0.07, 0.07);
    const SHADE_POSITION: f32 = 0.55;

    pub fn graph(&self, params: &SampledParameters) -> Result<PatternGraph> {
        let mut b = GraphBuilder::new();
        let coord = b.add(NodeKind::TexCoord {
            space: CoordSpace::Object,
        });
        let mapping = b.chain(
            coord,
            Socket::Object,
            NodeKind::mapping_scale(Vec3::new(1.0, 1.0, params.get(self.stretch))),
        )?;
        let wave = b.chain(
            mapping,
            Socket::Vector,
            NodeKind::Wave {
                wave_type: WaveType::Bands,
                direction: WaveDirection::Z,
                profile: WaveProfile::Sine,
                scale: params.get(self.scale),
                distortion: params.get(self.distortion),
                detail: 2.0,
                detail_scale: 1.0,
                phase: 0.0,
            },
        )?;
        let bias = b.chain(
            wave,
            Socket::Fac,
            NodeKind::Math {
                op: MathOp::Add,
                value: params.get(self.bias),
            },
        )?;
        let ramp = b.chain(
            bias,
            Socket::Value,
            NodeKind::ColorRamp {
                interpolation: RampInterpolation::Linear,
                stops: vec![
                    RampStop::new(0.0, Self::PALE),
                    RampStop::new(Self::SHADE_POSITION, Rgb::grey(params.get(self.shade_value))),
                    RampStop::new(1.0, Self::INK),
                ],
            },
        )?;
        b.finish(ramp, Socket::Color)
    }
}

/// Cap appearance recipe
#[derive(Clone, Copy, Debug)]
pub enum CapRecipe {
    Solid(SolidRecipe),
    Dots(DotsRecipe),
    Bands(BandsRecipe),
}

/// Stem and cap recipes of one species
#[derive(Clone, Copy, Debug)]
pub struct Recipe {
    pub stem: SolidRecipe,
    pub cap: CapRecipe,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{Species, sample};

    #[test]
    fn test_solid_jitter_is_clamped() {
        static RECIPE: SolidRecipe = SolidRecipe {
            base: BaseColor::Rgb(Rgb::new(1.0, 0.847914, 0.631299)),
            jitter: &[Jitter::new(Channel::All, ParamKey::StemValueJitter)],
        };
        let params = sample(Species::Toadstool, 0).with(ParamKey::StemValueJitter, 0.5);
        let color = RECIPE.color(&params);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 1.0);
        assert!(color.is_in_gamut());
    }

    #[test]
    fn test_rgb_base_without_hsv_jitter_is_exact() {
        static RECIPE: SolidRecipe = SolidRecipe {
            base: BaseColor::Rgb(Rgb::new(0.45, 0.38, 0.32)),
            jitter: &[Jitter::new(Channel::Red, ParamKey::CapRedJitter)],
        };
        let params = sample(Species::DrabBonnet, 0).with(ParamKey::CapRedJitter, 0.05);
        let color = RECIPE.color(&params);
        assert!((color.r - 0.5).abs() < 1e-6);
        assert_eq!(color.g, 0.38);
        assert_eq!(color.b, 0.32);
    }

    #[test]
    fn test_hue_jitter_shifts_hue() {
        static RECIPE: SolidRecipe = SolidRecipe {
            base: BaseColor::Hsv(Hsv::new(24.0, 0.62, 0.42)),
            jitter: &[Jitter::new(Channel::Hue, ParamKey::CapHueJitter)],
        };
        let params = sample(Species::Boletus, 0).with(ParamKey::CapHueJitter, 6.0);
        let hsv = RECIPE.color(&params).to_hsv();
        assert!((hsv.h - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_dots_graph_shape() {
        let CapRecipe::Dots(dots) = Species::Toadstool.profile().recipe.cap else {
            panic!("toadstool cap should be dotted");
        };
        let params = sample(Species::Toadstool, 42);
        let graph = dots.graph(&params).unwrap();
        let names: Vec<&str> = graph.nodes.iter().map(NodeKind::name).collect();
        assert_eq!(names, ["tex_coord", "mapping", "voronoi", "math", "color_ramp"]);
        graph.validate().unwrap();
    }

    #[test]
    fn test_bands_graph_has_three_stops() {
        let CapRecipe::Bands(bands) = Species::CrestedInkling.profile().recipe.cap else {
            panic!("inkling cap should be banded");
        };
        let params = sample(Species::CrestedInkling, 3);
        let graph = bands.graph(&params).unwrap();
        let Some((_, NodeKind::ColorRamp { stops, .. })) = graph.find("color_ramp") else {
            panic!("missing ramp");
        };
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].color, BandsRecipe::PALE);
        let shade = params.get(ParamKey::ShadeValue);
        assert_eq!(stops[1].color, Rgb::grey(shade));
    }
}
