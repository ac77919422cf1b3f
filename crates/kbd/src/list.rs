use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use kbd_footprint::{SwitchVariant, standard_variants};

use crate::options::SelectionArgs;

#[derive(Args, Debug, Clone)]
#[command(about = "Print the names of the standard footprints without writing files")]
pub struct ListArgs {
    /// Switch types to list, comma separated [possible values: none, solder,
    /// hotswap, hotswap-antishear]
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = SwitchVariant::from_str,
        default_value = "solder"
    )]
    pub switch: Vec<SwitchVariant>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Also print each footprint's description
    #[arg(short, long)]
    pub long: bool,
}

pub fn execute(args: ListArgs) -> Result<()> {
    let variants = standard_variants(&args.selection.selection(args.switch));

    for variant in &variants {
        let name = variant.name();
        if args.long {
            println!("{}\t{}", name.name, name.description);
        } else {
            println!("{}", name.name);
        }
    }
    Ok(())
}
