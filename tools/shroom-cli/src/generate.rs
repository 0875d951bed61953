//! Generate command - one mushroom from a species and seed

use crate::output::write_mushroom;
use anyhow::Result;
use clap::Args;
use shroom_gen::{MaterialSlot, Species, generate};
use std::path::PathBuf;

/// Arguments for the generate command
#[derive(Args)]
pub struct GenerateArgs {
    /// Species name or host tag (e.g. "toadstool", "SP4")
    #[arg(short, long)]
    pub species: String,

    /// Seed for the parameter stream
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Also write the full JSON record
    #[arg(long)]
    pub json: bool,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs) -> Result<()> {
    let species: Species = args.species.parse()?;
    let mushroom = generate(species, args.seed);

    let written = write_mushroom(&mushroom, &args.output, args.json)?;

    println!("Generated {} (seed {})", species, args.seed);
    println!(
        "  Mesh: {} vertices, {} faces",
        mushroom.mesh.vertex_count(),
        mushroom.mesh.face_count()
    );
    println!(
        "  Area: cap {:.3}, stem {:.3}",
        mushroom.mesh.slot_area(MaterialSlot::Cap),
        mushroom.mesh.slot_area(MaterialSlot::Stem)
    );
    println!("  OBJ: {}", written.obj.display());
    if let Some(json) = &written.json {
        println!("  JSON: {}", json.display());
    }
    Ok(())
}
