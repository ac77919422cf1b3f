use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use log::debug;

use crate::config;
use crate::generate::generate;
use crate::options::OutputArgs;

#[derive(Args, Debug, Clone)]
#[command(about = "Generate a footprint library from a TOML variant file")]
pub struct BuildArgs {
    /// Variant file describing the footprints to generate
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn execute(args: BuildArgs) -> Result<()> {
    let file = config::load(&args.file)?;
    let variants = file.variants();
    if variants.is_empty() {
        bail!("{} does not define any variants", args.file.display());
    }
    debug!("{} variant(s) from {}", variants.len(), args.file.display());

    // --name wins over the file's `library`, which wins over the file stem
    let name = match args.output.name.clone().or_else(|| file.library.clone()) {
        Some(name) => name,
        None => args
            .file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .with_context(|| {
                format!("Cannot derive a library name from {}", args.file.display())
            })?,
    };

    generate(&variants, &args.output, &name)
}
