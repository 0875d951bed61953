//! Preview command - render a cap (or stem) pattern swatch to PNG

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use shroom_gen::material::{MAX_SWATCH_EDGE, render_swatch, write_png};
use shroom_gen::{MaterialSlot, Species, generate};
use std::path::PathBuf;

/// Which material slot to render
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum SlotArg {
    #[default]
    Cap,
    Stem,
}

impl From<SlotArg> for MaterialSlot {
    fn from(slot: SlotArg) -> Self {
        match slot {
            SlotArg::Cap => MaterialSlot::Cap,
            SlotArg::Stem => MaterialSlot::Stem,
        }
    }
}

/// Arguments for the preview command
#[derive(Args)]
pub struct PreviewArgs {
    /// Species name or host tag
    #[arg(short, long)]
    pub species: String,

    /// Seed for the parameter stream
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Output PNG file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Swatch edge length in pixels
    #[arg(long, default_value_t = 256, value_parser = clap::value_parser!(u32).range(1..=MAX_SWATCH_EDGE as i64))]
    pub size: u32,

    /// Material slot to render
    #[arg(long, value_enum, default_value_t = SlotArg::Cap)]
    pub slot: SlotArg,
}

/// Execute the preview command
pub fn execute(args: PreviewArgs) -> Result<()> {
    let species: Species = args.species.parse()?;
    let mushroom = generate(species, args.seed);
    let appearance = mushroom.appearance(args.slot.into());

    let swatch = render_swatch(appearance, args.size, args.size)
        .context("Failed to render swatch")?;
    write_png(&swatch, &args.output)
        .with_context(|| format!("Failed to write PNG: {}", args.output.display()))?;

    let kind = if appearance.graph().is_some() {
        "pattern"
    } else {
        "solid"
    };
    println!(
        "Rendered {} {:?} ({kind}) seed {} -> {}",
        species,
        args.slot,
        args.seed,
        args.output.display()
    );
    Ok(())
}
