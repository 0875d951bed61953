//! Shroom CLI - host for the procedural mushroom generator
//!
//! # Commands
//!
//! - `shroom generate` - Generate one mushroom and write OBJ + MTL (and JSON)
//! - `shroom batch` - Generate every mushroom listed in a manifest, in parallel
//! - `shroom preview` - Render the cap pattern to a PNG swatch
//! - `shroom params` - Print the parameters a seed samples
//!
//! # Usage
//!
//! ```bash
//! # One toadstool into ./out
//! shroom generate --species toadstool --seed 42 -o out --json
//!
//! # Everything in a manifest
//! shroom batch mushrooms.toml -o out
//!
//! # Look at the inkling cap pattern
//! shroom preview --species crested_inkling --seed 7 -o inkling.png
//! ```
//!
//! # Manifest (mushrooms.toml)
//!
//! ```toml
//! [output]
//! dir = "out"
//! json = true
//!
//! [[mushroom]]
//! species = "toadstool"
//! seeds = [1, 2, 3]
//!
//! [[mushroom]]
//! species = "boletus"
//! count = 10
//! base_seed = 100
//! ```
//!
//! Logging follows `RUST_LOG`; `-v` raises the default level to debug.

mod batch;
mod generate;
mod manifest;
mod output;
mod params;
mod preview;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Shroom CLI - procedural mushroom generator
#[derive(Parser)]
#[command(name = "shroom")]
#[command(about = "Deterministic procedural mushroom generator")]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single mushroom
    Generate(generate::GenerateArgs),

    /// Generate every mushroom listed in a TOML manifest
    Batch(batch::BatchArgs),

    /// Render a cap pattern swatch to PNG
    Preview(preview::PreviewArgs),

    /// Print the sampled parameters of a species and seed
    Params(params::ParamsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Generate(args) => generate::execute(args),
        Commands::Batch(args) => batch::execute(args),
        Commands::Preview(args) => preview::execute(args),
        Commands::Params(args) => params::execute(args),
    }
}
