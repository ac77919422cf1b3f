use anyhow::{Context, Result};
use colored::Colorize;
use kbd_footprint::{Footprint, Variant};
use kbd_kicad::FootprintLibrary;
use log::{debug, info};
use rayon::prelude::*;

use crate::options::OutputArgs;

/// Build every variant in parallel, keeping the input order.
pub fn build_footprints(variants: &[Variant]) -> Result<Vec<Footprint>> {
    debug!("Building {} footprint(s)", variants.len());
    variants
        .par_iter()
        .map(|variant| {
            variant
                .build()
                .with_context(|| format!("Failed to build {}", variant.name().name))
        })
        .collect()
}

/// Build `variants` and write them to a library, or list them with
/// `--dry-run`.
pub fn generate(variants: &[Variant], output: &OutputArgs, library_name: &str) -> Result<()> {
    let footprints = build_footprints(variants)?;

    if output.dry_run {
        for fp in &footprints {
            println!("{}", fp.name());
        }
        return Ok(());
    }

    let mut library = FootprintLibrary::new(&output.out, library_name);
    if let Some(models) = &output.models {
        library = library.with_models_dir(models);
    }
    info!("Writing library {}", library.dir().display());

    let count = library
        .write_all(footprints)
        .with_context(|| format!("Failed to write library {library_name}"))?;

    println!(
        "{} {count} footprints to {}",
        "Wrote".green().bold(),
        library.dir().display()
    );
    Ok(())
}
