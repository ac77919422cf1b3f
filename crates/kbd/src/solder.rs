use anyhow::Result;
use clap::Args;
use kbd_footprint::{SwitchVariant, standard_variants};

use crate::generate::generate;
use crate::options::{OutputArgs, SelectionArgs};

const DEFAULT_LIBRARY: &str = "MX_Solder";

#[derive(Args, Debug, Clone)]
#[command(about = "Generate MX switch footprints with through-hole solder pads")]
pub struct SolderArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn execute(args: SolderArgs) -> Result<()> {
    let selection = args.selection.selection(vec![SwitchVariant::Solder]);
    let variants = standard_variants(&selection);
    let name = args.output.name.as_deref().unwrap_or(DEFAULT_LIBRARY);
    generate(&variants, &args.output, name)
}
