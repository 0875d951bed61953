//! Stem and cap appearance descriptors

use super::color::Rgb;
use super::graph::{NodeKind, PatternGraph};
use super::recipes::{CapRecipe, SolidRecipe};
use crate::error::Result;
use crate::species::{SampledParameters, Species};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Surface description handed to the host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Appearance {
    Solid {
        color: Rgb,
    },
    /// Procedural pattern plus a flat fallback for hosts that cannot
    /// evaluate graphs
    Pattern {
        graph: PatternGraph,
        viewport: Rgb,
    },
}

impl Appearance {
    /// Flat color to show when the pattern is not evaluated
    pub fn viewport_color(&self) -> Rgb {
        match self {
            Appearance::Solid { color } => *color,
            Appearance::Pattern { viewport, .. } => *viewport,
        }
    }

    pub fn graph(&self) -> Option<&PatternGraph> {
        match self {
            Appearance::Solid { .. } => None,
            Appearance::Pattern { graph, .. } => Some(graph),
        }
    }
}

fn solid(recipe: &SolidRecipe, params: &SampledParameters) -> Appearance {
    Appearance::Solid {
        color: recipe.color(params),
    }
}

/// Build the stem and cap appearances of `species`
///
/// Independent of the mesh; only reads the color parameters.
///
/// # Panics
/// If a recipe produces a malformed graph. Recipe graphs are fixed, so this
/// is a programming error.
pub fn build_appearance(species: Species, params: &SampledParameters) -> (Appearance, Appearance) {
    let recipe = &species.profile().recipe;
    let stem = solid(&recipe.stem, params);

    let pattern = |graph: Result<PatternGraph>| match graph {
        Ok(graph) => {
            let viewport = first_stop_color(&graph);
            Appearance::Pattern { graph, viewport }
        }
        Err(err) => panic!("{species} cap recipe builds a malformed graph: {err}"),
    };

    let cap = match &recipe.cap {
        CapRecipe::Solid(solid_recipe) => solid(solid_recipe, params),
        CapRecipe::Dots(dots) => pattern(dots.graph(params)),
        CapRecipe::Bands(bands) => pattern(bands.graph(params)),
    };

    debug!(
        species = species.slug(),
        stem = ?stem.viewport_color(),
        cap = ?cap.viewport_color(),
        "appearance built"
    );
    (stem, cap)
}

fn first_stop_color(graph: &PatternGraph) -> Rgb {
    graph
        .nodes
        .iter()
        .rev()
        .find_map(|node| match node {
            NodeKind::ColorRamp { stops, .. } => stops.first().map(|s| s.color),
            _ => None,
        })
        .unwrap_or(Rgb::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{ParamKey, sample};

    #[test]
    fn test_solid_species() {
        for species in [Species::Boletus, Species::DrabBonnet] {
            let (stem, cap) = build_appearance(species, &sample(species, 1));
            assert!(matches!(stem, Appearance::Solid { .. }));
            assert!(matches!(cap, Appearance::Solid { .. }));
            assert!(cap.viewport_color().is_in_gamut());
        }
    }

    #[test]
    fn test_pattern_species() {
        for species in [Species::CrestedInkling, Species::Toadstool] {
            let (stem, cap) = build_appearance(species, &sample(species, 1));
            assert!(matches!(stem, Appearance::Solid { .. }));
            let graph = cap.graph().unwrap();
            graph.validate().unwrap();
        }
    }

    #[test]
    fn test_toadstool_viewport_is_red() {
        let params = sample(Species::Toadstool, 42);
        let (_, cap) = build_appearance(Species::Toadstool, &params);
        let viewport = cap.viewport_color();
        assert_eq!(viewport.r, 1.0);
        assert_eq!(viewport.g, params.get(ParamKey::CapGreen));
        assert_eq!(viewport.b, 0.0);
    }

    #[test]
    fn test_toadstool_stem_is_darkened_cream() {
        let params = sample(Species::Toadstool, 9);
        let (stem, _) = build_appearance(Species::Toadstool, &params);
        let jitter = params.get(ParamKey::StemValueJitter);
        let color = stem.viewport_color();
        assert!((color.g - (0.847914 + jitter)).abs() < 1e-6);
        assert!(color.r <= 1.0);
    }

    #[test]
    fn test_appearance_serializes_with_kind_tag() {
        let (stem, cap) = build_appearance(Species::Toadstool, &sample(Species::Toadstool, 2));
        let stem_json = serde_json::to_string(&stem).unwrap();
        let cap_json = serde_json::to_string(&cap).unwrap();
        assert!(stem_json.contains("\"kind\":\"solid\""));
        assert!(cap_json.contains("\"kind\":\"pattern\""));
        assert!(cap_json.contains("\"voronoi\""));
    }
}
