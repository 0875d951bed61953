//! Params command - show what a seed samples

use anyhow::{Context, Result};
use clap::Args;
use shroom_gen::{SampledParameters, Species, sample};

/// Arguments for the params command
#[derive(Args)]
pub struct ParamsArgs {
    /// Species name or host tag
    #[arg(short, long)]
    pub species: String,

    /// Seed for the parameter stream
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Print as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Execute the params command
pub fn execute(args: ParamsArgs) -> Result<()> {
    let species: Species = args.species.parse()?;
    let params = sample(species, args.seed);

    if args.json {
        let json = serde_json::to_string_pretty(&params).context("Failed to serialize parameters")?;
        println!("{json}");
    } else {
        print!("{}", format_table(species, args.seed, &params));
    }
    Ok(())
}

fn format_table(species: Species, seed: u64, params: &SampledParameters) -> String {
    let profile = species.profile();
    let mut out = format!("{species} (seed {seed})\n");
    for (key, value) in params.iter() {
        let (min, max) = profile
            .spec(key)
            .map(|spec| spec.bounds())
            .unwrap_or((value, value));
        let range = if min == max {
            "constant".to_string()
        } else {
            format!("[{min}, {max}]")
        };
        out.push_str(&format!("  {:<24} {value:>10.4}  {range}\n", key.name()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shroom_gen::ParamKey;

    #[test]
    fn test_table_lists_every_parameter() {
        let params = sample(Species::Toadstool, 42);
        let table = format_table(Species::Toadstool, 42, &params);
        assert!(table.starts_with("Toadstool (seed 42)"));
        assert_eq!(table.lines().count(), params.len() + 1);
        assert!(table.contains(ParamKey::StemThickness.name()));
    }
}
